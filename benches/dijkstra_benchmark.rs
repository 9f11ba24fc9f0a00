//! Criterion benchmarks for the Fibonacci heap and shortest-path queries
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench dijkstra_benchmark
//!
//! # Only the grid queries
//! cargo bench --bench dijkstra_benchmark -- 'dijkstra_grid/'
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fibonacci_paths::fibonacci::FibonacciHeap;
use fibonacci_paths::graph::Graph;
use fibonacci_paths::{DecreaseKeyHeap, Heap};

/// Square grid with both directions per neighbour and varying weights
fn grid_graph(size: usize) -> Graph<usize, u64> {
    let mut graph = Graph::new();
    for y in 0..size {
        for x in 0..size {
            let id = y * size + x;
            let weight = ((x * 7 + y * 13) % 9 + 1) as u64;
            if x + 1 < size {
                graph.add_edge(id, id + 1, weight).unwrap();
                graph.add_edge(id + 1, id, weight).unwrap();
            }
            if y + 1 < size {
                graph.add_edge(id, id + size, weight).unwrap();
                graph.add_edge(id + size, id, weight).unwrap();
            }
        }
    }
    graph
}

fn bench_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("fibonacci_heap");

    for &n in &[1_000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("push_pop", n), &n, |b, &n| {
            b.iter(|| {
                let mut heap = FibonacciHeap::new();
                for i in 0..n {
                    heap.push((i * 7919) % n, i);
                }
                while let Some(entry) = heap.pop() {
                    black_box(entry);
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("decrease_key", n), &n, |b, &n| {
            b.iter(|| {
                let mut heap = FibonacciHeap::new();
                let handles: Vec<_> = (0..n).map(|i| heap.push_with_handle(n + i, i)).collect();
                heap.push(0, n);
                heap.pop();
                for (i, handle) in handles.iter().enumerate() {
                    heap.decrease_key(handle, i).unwrap();
                }
                black_box(heap.pop());
            });
        });
    }

    group.finish();
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra_grid");

    for &size in &[32usize, 128, 256] {
        let graph = grid_graph(size);
        group.bench_with_input(BenchmarkId::from_parameter(size * size), &graph, |b, graph| {
            b.iter(|| black_box(graph.shortest_path(&0)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_heap, bench_dijkstra);
criterion_main!(benches);

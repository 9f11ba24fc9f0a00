//! Stress tests that push the heap and the shortest-path engine harder
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use fibonacci_paths::dijkstra::Distance;
use fibonacci_paths::fibonacci::FibonacciHeap;
use fibonacci_paths::graph::Graph;
use fibonacci_paths::{DecreaseKeyHeap, Heap};

#[test]
fn test_massive_operations() {
    let mut heap = FibonacciHeap::new();

    for i in 0..1000 {
        heap.push(i, i);
    }
    assert_eq!(heap.len(), 1000);

    for i in 0..1000 {
        assert_eq!(heap.pop(), Some((i, i)));
    }
    assert!(heap.is_empty());
}

#[test]
fn test_reverse_insertion() {
    let mut heap = FibonacciHeap::new();
    for i in (0..1000).rev() {
        heap.push(i, i);
    }
    for i in 0..1000 {
        assert_eq!(heap.pop(), Some((i, i)));
    }
}

#[test]
fn test_many_decrease_keys() {
    let mut heap = FibonacciHeap::new();
    let mut handles = Vec::new();

    for i in 0..500 {
        handles.push(heap.push_with_handle(10000 + i, i));
    }
    // Force trees to form so decreases have parents to be cut from
    heap.push(-1, -1);
    assert_eq!(heap.pop(), Some((-1, -1)));

    for (i, handle) in handles.iter().enumerate().rev() {
        assert!(heap.decrease_key(handle, i as i32).is_ok());
    }
    assert!(heap.verify_structure());

    for i in 0..500 {
        assert_eq!(heap.pop(), Some((i, i)));
    }
}

#[test]
fn test_alternating_ops() {
    let mut heap = FibonacciHeap::new();

    for i in 0..200 {
        heap.push(i * 2, i);
        heap.push(i * 2 + 1, i + 1000);
        let popped = heap.pop().unwrap();
        assert_eq!(popped.0, i);
    }
    assert_eq!(heap.len(), 200);
    assert!(heap.verify_structure());
}

#[test]
fn test_interleaved_decrease_and_pop() {
    let mut heap = FibonacciHeap::new();
    let handles: Vec<_> = (0..1024).map(|i| heap.push_with_handle(i * 10, i)).collect();

    let mut expected_min = 0;
    for round in 0..256 {
        // Pull a far element to the front, then pop it
        let target = 1023 - round;
        heap.decrease_key(&handles[target as usize], -round - 1).unwrap();
        assert_eq!(heap.pop(), Some((-round - 1, target)));

        assert_eq!(heap.pop(), Some((expected_min * 10, expected_min)));
        expected_min += 1;
    }
    assert!(heap.verify_structure());
    assert_eq!(heap.len(), 1024 - 512);
}

#[test]
fn test_delete_every_other() {
    let mut heap = FibonacciHeap::new();
    let handles: Vec<_> = (0..600).map(|i| heap.push_with_handle(i, i)).collect();
    heap.pop();

    for handle in handles.iter().skip(1).step_by(2) {
        heap.delete(handle).unwrap();
    }
    assert!(heap.verify_structure());

    let mut expected = 2;
    while let Some((priority, _)) = heap.pop() {
        assert_eq!(priority, expected);
        expected += 2;
    }
    assert_eq!(expected, 600);
}

#[test]
fn test_repeated_merges() {
    let mut total = FibonacciHeap::new();
    for chunk in 0..20 {
        let mut part = FibonacciHeap::new();
        for i in 0..50 {
            part.push(chunk * 50 + i, ());
        }
        part.push(-1, ());
        part.pop();
        total.merge(part);
    }
    assert_eq!(total.len(), 1000);
    assert!(total.verify_structure());

    for i in 0..1000 {
        assert_eq!(total.pop(), Some((i, ())));
    }
}

#[test]
fn test_long_chain_graph() {
    let n = 5000u32;
    let mut graph = Graph::new();
    for i in 0..n {
        graph.add_edge(i, i + 1, 1u64).unwrap();
        // Expensive shortcuts that relaxation must later undercut
        if i + 10 <= n {
            graph.add_edge(i, i + 10, 100).unwrap();
        }
    }

    let distances = graph.shortest_path(&0).unwrap();
    assert_eq!(distances[&n], Distance::Finite(u64::from(n)));
    assert_eq!(distances[&(n / 2)], Distance::Finite(u64::from(n / 2)));
}

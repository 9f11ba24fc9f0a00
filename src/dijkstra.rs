//! Single-source shortest paths (Dijkstra's algorithm) driven by a decrease-key heap
//!
//! Every vertex of the graph is pushed into the heap once, keyed by its
//! tentative distance: zero for the source, [`Distance::Infinite`] for everyone
//! else. The loop repeatedly pops the closest unsettled vertex and relaxes its
//! outgoing edges, lowering the neighbours' keys with `decrease_key`. Each heap
//! element carries its vertex index, so a popped element maps back to its
//! vertex in O(1) and the whole query runs in O(E + V log V) with a
//! [`FibonacciHeap`].
//!
//! # Example
//!
//! ```rust
//! use fibonacci_paths::dijkstra::{Distance, ShortestPathQuery};
//! use fibonacci_paths::graph::Graph;
//!
//! let mut graph = Graph::new();
//! graph.add_edge("A", "B", 1u32).unwrap();
//! graph.add_edge("B", "C", 2).unwrap();
//! graph.add_edge("A", "C", 10).unwrap();
//!
//! let paths = ShortestPathQuery::new(&graph, &"A").unwrap().run_fibonacci();
//! assert_eq!(paths.distance(&"C"), Some(Distance::Finite(3)));
//! assert_eq!(paths.path_to(&"C"), Some(vec!["A", "B", "C"]));
//! ```

use crate::fibonacci::FibonacciHeap;
use crate::graph::{Graph, VertexId};
use crate::traits::DecreaseKeyHeap;
use num_traits::CheckedAdd;
use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

/// Trait for types that can be used as edge weights.
///
/// This requires the type to be orderable, copyable, and support checked addition.
/// `Default` supplies the zero distance of the source. A path whose length
/// overflows the weight type is never used for relaxation.
pub trait Weight: Ord + Copy + CheckedAdd + Default + fmt::Debug {}

impl<T> Weight for T where T: Ord + Copy + CheckedAdd + Default + fmt::Debug {}

/// Distance from the source to a vertex
///
/// Every finite distance orders below [`Distance::Infinite`], which stands
/// for "no path".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance<W> {
    Finite(W),
    Infinite,
}

impl<W> Distance<W> {
    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// Returns the finite value, or `None` for an unreachable vertex
    pub fn finite(self) -> Option<W> {
        match self {
            Distance::Finite(w) => Some(w),
            Distance::Infinite => None,
        }
    }
}

impl<W: fmt::Display> fmt::Display for Distance<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(w) => write!(f, "{w}"),
            Distance::Infinite => write!(f, "inf"),
        }
    }
}

/// Result of a single-source shortest-path query.
///
/// Borrows the graph it was computed on so results can be looked up by label.
#[derive(Debug, Clone)]
pub struct ShortestPaths<'g, L, W> {
    graph: &'g Graph<L, W>,
    source: VertexId,
    distances: Vec<Distance<W>>,
    predecessors: Vec<Option<VertexId>>,
    settled: usize,
}

impl<'g, L, W> ShortestPaths<'g, L, W>
where
    L: Clone + Eq + Hash,
    W: Weight,
{
    /// The label of the source vertex
    pub fn source(&self) -> &L {
        &self.graph.labels()[self.source]
    }

    /// Number of vertices settled (popped with a finite distance) by the search
    pub fn settled_count(&self) -> usize {
        self.settled
    }

    /// Distance to the vertex with the given label, or `None` if the label is unknown
    pub fn distance(&self, label: &L) -> Option<Distance<W>> {
        self.graph
            .vertex_id(label)
            .map(|id| self.distances[id])
    }

    /// Distances indexed by vertex id
    pub fn distances(&self) -> &[Distance<W>] {
        &self.distances
    }

    /// Reconstructs a shortest path from the source to `target`, inclusive.
    ///
    /// Returns `None` if the label is unknown or the target is unreachable.
    pub fn path_to(&self, target: &L) -> Option<Vec<L>> {
        let mut current = self.graph.vertex_id(target)?;
        if !self.distances[current].is_finite() {
            return None;
        }

        let labels = self.graph.labels();
        let mut path = vec![labels[current].clone()];
        while let Some(prev) = self.predecessors[current] {
            path.push(labels[prev].clone());
            current = prev;
        }

        path.reverse();
        Some(path)
    }

    /// Converts the result into a map from every vertex label to its distance
    pub fn into_distance_map(self) -> FxHashMap<L, Distance<W>> {
        self.graph
            .labels()
            .iter()
            .cloned()
            .zip(self.distances)
            .collect()
    }
}

/// Builder for shortest-path queries with more configuration options.
pub struct ShortestPathQuery<'g, L, W> {
    graph: &'g Graph<L, W>,
    source: VertexId,
    max_distance: Option<W>,
}

impl<'g, L, W> ShortestPathQuery<'g, L, W>
where
    L: Clone + Eq + Hash,
    W: Weight,
{
    /// Creates a query from `source`, or `None` if the source is not a vertex of `graph`.
    pub fn new(graph: &'g Graph<L, W>, source: &L) -> Option<Self> {
        let source = graph.vertex_id(source)?;
        Some(ShortestPathQuery {
            graph,
            source,
            max_distance: None,
        })
    }

    /// Sets the maximum distance to explore.
    ///
    /// Vertices farther than `limit` are reported as [`Distance::Infinite`].
    pub fn max_distance(mut self, limit: W) -> Self {
        self.max_distance = Some(limit);
        self
    }

    /// Runs the query on a [`FibonacciHeap`].
    pub fn run_fibonacci(self) -> ShortestPaths<'g, L, W> {
        self.run::<FibonacciHeap<VertexId, Distance<W>>>()
    }

    /// Runs the query on any heap supporting `decrease_key`.
    pub fn run<H>(self) -> ShortestPaths<'g, L, W>
    where
        H: DecreaseKeyHeap<VertexId, Distance<W>>,
    {
        let graph = self.graph;
        let vertex_count = graph.vertex_count();

        let mut distances = vec![Distance::Infinite; vertex_count];
        distances[self.source] = Distance::Finite(W::default());
        let mut predecessors = vec![None; vertex_count];
        let mut settled = vec![false; vertex_count];

        let mut heap = H::new();
        let handles: Vec<H::Handle> = distances
            .iter()
            .enumerate()
            .map(|(vertex, &distance)| heap.push_with_handle(distance, vertex))
            .collect();

        debug!(
            source = self.source,
            vertices = vertex_count,
            edges = graph.edge_count(),
            "starting shortest-path query"
        );

        let mut settled_count = 0usize;
        let mut relaxations = 0usize;

        while let Some((distance, u)) = heap.pop() {
            // Everything left in the heap is unreachable
            let Distance::Finite(du) = distance else {
                break;
            };
            if self.max_distance.is_some_and(|limit| du > limit) {
                break;
            }

            settled[u] = true;
            settled_count += 1;

            for edge in graph.neighbors(u) {
                let v = edge.target;
                if settled[v] {
                    continue;
                }

                // A sum the weight type cannot represent is no path at all
                let Some(sum) = du.checked_add(&edge.weight) else {
                    trace!(from = u, to = v, "skipped overflowing relaxation");
                    continue;
                };
                let candidate = Distance::Finite(sum);
                if candidate < distances[v] {
                    trace!(from = u, to = v, distance = ?candidate, "relaxed edge");
                    distances[v] = candidate;
                    predecessors[v] = Some(u);
                    relaxations += 1;

                    let decreased = heap.decrease_key(&handles[v], candidate);
                    debug_assert!(
                        decreased.is_ok(),
                        "vertex {v} is unsettled but its heap entry rejected decrease_key: {decreased:?}"
                    );
                }
            }
        }

        // Vertices never settled are out of reach (or beyond the distance limit)
        for (vertex, done) in settled.iter().enumerate() {
            if !done {
                distances[vertex] = Distance::Infinite;
                predecessors[vertex] = None;
            }
        }

        debug!(
            settled = settled_count,
            relaxations, "finished shortest-path query"
        );

        ShortestPaths {
            graph,
            source: self.source,
            distances,
            predecessors,
            settled: settled_count,
        }
    }
}

//! Weighted directed graph over arbitrary vertex labels
//!
//! Labels are mapped to dense [`VertexId`]s on first sight, and each vertex
//! keeps its outgoing edges in insertion order. Parallel edges between the
//! same pair of vertices are kept as separate edges; all of them take part
//! in relaxation.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_paths::dijkstra::Distance;
//! use fibonacci_paths::graph::Graph;
//!
//! let mut graph = Graph::new();
//! graph.add_edge("A", "B", 1u64).unwrap();
//! graph.add_edge("B", "C", 2).unwrap();
//!
//! let distances = graph.shortest_path(&"A").unwrap();
//! assert_eq!(distances[&"C"], Distance::Finite(3));
//! assert!(graph.shortest_path(&"Z").is_none());
//! ```

use crate::dijkstra::{Distance, ShortestPathQuery, ShortestPaths, Weight};
use rustc_hash::FxHashMap;
use std::hash::Hash;
use thiserror::Error;

/// Dense index of a vertex, assigned in order of first appearance
pub type VertexId = usize;

/// Error type for graph construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Dijkstra's algorithm requires non-negative edge weights
    #[error("edge weight is negative")]
    NegativeWeight,
}

/// An outgoing edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<W> {
    pub target: VertexId,
    pub weight: W,
}

/// Weighted directed graph with adjacency lists
#[derive(Debug, Clone)]
pub struct Graph<L, W> {
    /// Maps a label to its vertex id
    index: FxHashMap<L, VertexId>,
    /// Maps a vertex id back to its label
    labels: Vec<L>,
    /// Outgoing edges per vertex id
    adjacency: Vec<Vec<Edge<W>>>,
    edge_count: usize,
}

impl<L, W> Default for Graph<L, W>
where
    L: Clone + Eq + Hash,
    W: Weight,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<L, W> Graph<L, W>
where
    L: Clone + Eq + Hash,
    W: Weight,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Graph {
            index: FxHashMap::default(),
            labels: Vec::new(),
            adjacency: Vec::new(),
            edge_count: 0,
        }
    }

    /// Registers a vertex, returning its id.
    ///
    /// Adding a label that is already present returns the existing id.
    pub fn add_vertex(&mut self, label: L) -> VertexId {
        if let Some(&id) = self.index.get(&label) {
            return id;
        }

        let id = self.labels.len();
        self.index.insert(label.clone(), id);
        self.labels.push(label);
        self.adjacency.push(Vec::new());
        id
    }

    /// Adds a directed edge `source -> target`, registering both endpoints.
    ///
    /// # Errors
    /// Returns `GraphError::NegativeWeight` if `weight` is below zero; the
    /// graph is left unchanged.
    pub fn add_edge(&mut self, source: L, target: L, weight: W) -> Result<(), GraphError> {
        if weight < W::default() {
            return Err(GraphError::NegativeWeight);
        }

        let source = self.add_vertex(source);
        let target = self.add_vertex(target);
        self.adjacency[source].push(Edge { target, weight });
        self.edge_count += 1;
        Ok(())
    }

    /// Looks up the id of a label
    pub fn vertex_id(&self, label: &L) -> Option<VertexId> {
        self.index.get(label).copied()
    }

    /// Looks up the label of a vertex id
    pub fn label(&self, id: VertexId) -> Option<&L> {
        self.labels.get(id)
    }

    /// Returns true if the label has been registered
    pub fn contains_vertex(&self, label: &L) -> bool {
        self.index.contains_key(label)
    }

    /// Number of registered vertices
    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of edges, parallel edges counted separately
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Labels indexed by vertex id
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Outgoing edges of a vertex, in insertion order
    ///
    /// An unknown id has no edges.
    pub fn neighbors(&self, id: VertexId) -> &[Edge<W>] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over `(id, label)` pairs in id order
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &L)> + '_ {
        self.labels.iter().enumerate()
    }

    /// Distances from `source` to every vertex of the graph.
    ///
    /// Unreachable vertices map to [`Distance::Infinite`]. Returns `None` if
    /// `source` was never added to the graph.
    pub fn shortest_path(&self, source: &L) -> Option<FxHashMap<L, Distance<W>>> {
        self.shortest_paths(source)
            .map(ShortestPaths::into_distance_map)
    }

    /// Full shortest-path result from `source`, including the predecessor tree.
    ///
    /// Returns `None` if `source` was never added to the graph.
    pub fn shortest_paths(&self, source: &L) -> Option<ShortestPaths<'_, L, W>> {
        ShortestPathQuery::new(self, source).map(ShortestPathQuery::run_fibonacci)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut graph: Graph<&str, u32> = Graph::new();
        assert_eq!(graph.add_vertex("A"), 0);
        assert_eq!(graph.add_vertex("B"), 1);
        assert_eq!(graph.add_vertex("A"), 0);
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.label(1), Some(&"B"));
        assert_eq!(graph.label(2), None);
    }

    #[test]
    fn test_add_edge_registers_endpoints() {
        let mut graph = Graph::new();
        graph.add_edge("A", "B", 3u32).unwrap();
        assert!(graph.contains_vertex(&"A"));
        assert!(graph.contains_vertex(&"B"));
        assert_eq!(graph.vertex_id(&"B"), Some(1));
        assert_eq!(graph.neighbors(0), &[Edge { target: 1, weight: 3 }]);
        assert!(graph.neighbors(1).is_empty());
        assert!(graph.neighbors(42).is_empty());
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let mut graph = Graph::new();
        for weight in [1i64, 2, 3] {
            graph.add_edge("A", "B", weight).unwrap();
        }
        assert_eq!(graph.edge_count(), 3);
        let weights: Vec<_> = graph.neighbors(0).iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![1, 2, 3]);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut graph = Graph::new();
        assert_eq!(graph.add_edge("A", "B", -1i32), Err(GraphError::NegativeWeight));
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.add_edge("A", "B", 0), Ok(()));
    }

    #[test]
    fn test_vertices_in_id_order() {
        let mut graph = Graph::new();
        graph.add_edge("x", "y", 1u8).unwrap();
        graph.add_vertex("z");
        let labels: Vec<_> = graph.vertices().map(|(_, label)| *label).collect();
        assert_eq!(labels, vec!["x", "y", "z"]);
    }
}

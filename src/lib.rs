//! Fibonacci heap and Dijkstra shortest paths for Rust
//!
//! This crate provides a Fibonacci heap with efficient `decrease_key` support and a
//! weighted directed graph whose single-source shortest-path query is driven by it.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) amortized insert and decrease_key; O(log n) amortized
//!   delete-min and delete; destructive merge of two heaps
//! - **Graph**: adjacency lists over arbitrary hashable vertex labels, parallel edges kept
//! - **Dijkstra**: O(E + V log V) single-source distances with path reconstruction
//!
//! # Example
//!
//! ```rust
//! use fibonacci_paths::dijkstra::Distance;
//! use fibonacci_paths::graph::Graph;
//!
//! let mut graph = Graph::new();
//! graph.add_edge("A", "B", 1u32).unwrap();
//! graph.add_edge("A", "C", 4).unwrap();
//! graph.add_edge("B", "C", 2).unwrap();
//! graph.add_edge("B", "D", 5).unwrap();
//! graph.add_edge("C", "D", 1).unwrap();
//!
//! let distances = graph.shortest_path(&"A").unwrap();
//! assert_eq!(distances[&"D"], Distance::Finite(4));
//! ```

pub mod dijkstra;
pub mod fibonacci;
pub mod graph;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{DecreaseKeyHeap, Heap, HeapError};

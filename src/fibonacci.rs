//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert and decrease_key
//! - O(log n) amortized delete_min and delete
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list. The heap maintains the minimum node.
//!
//! Nodes live in a generational [`SlotMap`] arena and refer to each other by
//! slot key, so the sibling rings, child pointers and parent back-links carry
//! no aliasing or lifetime hazards. A [`FibonacciHandle`] whose node has been
//! popped or deleted is detected and rejected with [`HeapError::InvalidHandle`].

use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

new_key_type! {
    /// Arena slot of a heap node
    struct NodeKey;
}

/// Source of per-instance heap ids, so a handle is never honored by a heap
/// other than the one that issued it.
static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

fn next_heap_id() -> u64 {
    NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed)
}

/// Golden ratio; the degree of any node is at most log_phi(n).
const PHI: f64 = 1.618_033_988_749_895;

/// Handle to an element in a Fibonacci heap
///
/// A handle is tied to the heap instance that issued it. It stops being valid
/// once its element is popped or deleted, or once the heap is merged into
/// another non-empty heap.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    heap: u64,
    node: NodeKey,
}

impl Handle for FibonacciHandle {}

struct Node<T, P> {
    item: T,
    priority: P,
    parent: Option<NodeKey>,
    child: Option<NodeKey>,
    left: NodeKey,
    right: NodeKey,
    degree: usize,
    marked: bool,
}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use fibonacci_paths::fibonacci::FibonacciHeap;
/// use fibonacci_paths::{DecreaseKeyHeap, Heap};
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push_with_handle(5, "item");
/// heap.push(3, "other");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.peek(), Some((&1, &"item")));
/// ```
pub struct FibonacciHeap<T, P: Ord> {
    nodes: SlotMap<NodeKey, Node<T, P>>,
    min: Option<NodeKey>,
    id: u64,
}

impl<T, P: Ord> Default for FibonacciHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> Heap<T, P> for FibonacciHeap<T, P> {
    fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            min: None,
            id: next_heap_id(),
        }
    }

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, priority: P, item: T) {
        self.push_with_handle(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.min.map(|min| {
            let node = &self.nodes[min];
            (&node.priority, &node.item)
        })
    }

    fn pop(&mut self) -> Option<(P, T)> {
        let z = self.min?;

        // Promote every child of z to the root list
        if let Some(child) = self.nodes[z].child.take() {
            let mut current = child;
            loop {
                let node = &mut self.nodes[current];
                node.parent = None;
                node.marked = false;
                current = node.right;
                if current == child {
                    break;
                }
            }
            self.splice_rings(z, child);
            self.nodes[z].degree = 0;
        }

        // Remove z from the root list
        let right = self.nodes[z].right;
        if right == z {
            self.min = None;
        } else {
            self.unlink(z);
            self.min = Some(right);
            self.consolidate();
        }

        self.nodes
            .remove(z)
            .map(|node| (node.priority, node.item))
    }

    fn merge(&mut self, mut other: Self) {
        let Some(other_min) = other.min.take() else {
            return;
        };

        if self.min.is_none() {
            other.min = Some(other_min);
            *self = other;
            return;
        }

        // Move the other arena's nodes into ours, then rewrite their links
        let moved_nodes = std::mem::take(&mut other.nodes);
        let mut remap: SecondaryMap<NodeKey, NodeKey> =
            SecondaryMap::with_capacity(moved_nodes.len());
        let mut moved = Vec::with_capacity(moved_nodes.len());
        for (old_key, node) in moved_nodes {
            let new_key = self.nodes.insert(node);
            remap.insert(old_key, new_key);
            moved.push(new_key);
        }
        for key in moved {
            let node = &mut self.nodes[key];
            node.left = remap[node.left];
            node.right = remap[node.right];
            node.parent = node.parent.map(|parent| remap[parent]);
            node.child = node.child.map(|child| remap[child]);
        }

        let other_min = remap[other_min];
        self.add_root(other_min);
        self.update_min(other_min);
    }
}

impl<T, P: Ord> DecreaseKeyHeap<T, P> for FibonacciHeap<T, P> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        let node = self.nodes.insert_with_key(|key| Node {
            item,
            priority,
            parent: None,
            child: None,
            left: key,
            right: key,
            degree: 0,
            marked: false,
        });

        self.add_root(node);
        self.update_min(node);

        FibonacciHandle {
            heap: self.id,
            node,
        }
    }

    fn get(&self, handle: &Self::Handle) -> Option<(&P, &T)> {
        let key = self.resolve(handle).ok()?;
        let node = &self.nodes[key];
        Some((&node.priority, &node.item))
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        let x = self.resolve(handle)?;

        if new_priority > self.nodes[x].priority {
            return Err(HeapError::PriorityIncreased);
        }
        self.nodes[x].priority = new_priority;

        if let Some(y) = self.nodes[x].parent {
            if self.nodes[x].priority < self.nodes[y].priority {
                self.cut(x, y);
                self.cascading_cut(y);
            }
        }

        self.update_min(x);
        Ok(())
    }

    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError> {
        let x = self.resolve(handle)?;

        // Treat x as negative infinity: move it to the root list and make it the minimum
        if let Some(y) = self.nodes[x].parent {
            self.cut(x, y);
            self.cascading_cut(y);
        }
        self.min = Some(x);

        self.pop().ok_or(HeapError::InvalidHandle)
    }
}

impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Builds a new heap holding the contents of both inputs
    ///
    /// Both inputs are consumed. Handles issued by `first` stay valid on the
    /// result. Handles issued by `second` stay valid only when `first` is
    /// empty, in which case the result is `second` itself.
    pub fn union(mut first: Self, second: Self) -> Self {
        first.merge(second);
        first
    }

    /// Checks every structural invariant of the heap
    ///
    /// Verifies that:
    /// - every sibling ring is consistent (`x.right.left == x`, `x.left.right == x`)
    /// - each node's degree equals the size of its child ring
    /// - children point back at their parent, and roots have no parent and no mark
    /// - no child has a smaller priority than its parent
    /// - `min` is a root holding the smallest priority
    /// - the number of reachable nodes equals `len()`
    ///
    /// Runs in O(n); intended for tests and debugging.
    pub fn verify_structure(&self) -> bool {
        let Some(min) = self.min else {
            return self.nodes.is_empty();
        };
        let Some(roots) = self.ring(min) else {
            return false;
        };

        let mut reachable = 0usize;
        let mut stack = Vec::new();
        for &root in &roots {
            let node = &self.nodes[root];
            if node.parent.is_some() || node.marked {
                return false;
            }
            if node.priority < self.nodes[min].priority {
                return false;
            }
            stack.push(root);
        }

        while let Some(key) = stack.pop() {
            reachable += 1;
            if reachable > self.nodes.len() {
                return false;
            }
            let node = &self.nodes[key];
            match node.child {
                None => {
                    if node.degree != 0 {
                        return false;
                    }
                }
                Some(child) => {
                    let Some(children) = self.ring(child) else {
                        return false;
                    };
                    if children.len() != node.degree {
                        return false;
                    }
                    for child in children {
                        let child_node = &self.nodes[child];
                        if child_node.parent != Some(key) || child_node.priority < node.priority {
                            return false;
                        }
                        stack.push(child);
                    }
                }
            }
        }

        reachable == self.nodes.len()
    }

    fn resolve(&self, handle: &FibonacciHandle) -> Result<NodeKey, HeapError> {
        if handle.heap != self.id || !self.nodes.contains_key(handle.node) {
            return Err(HeapError::InvalidHandle);
        }
        Ok(handle.node)
    }

    /// Collects the ring containing `start`, or `None` if it is not consistent
    fn ring(&self, start: NodeKey) -> Option<Vec<NodeKey>> {
        let mut members = Vec::new();
        let mut current = start;
        loop {
            let node = self.nodes.get(current)?;
            let right = self.nodes.get(node.right)?;
            let left = self.nodes.get(node.left)?;
            if right.left != current || left.right != current {
                return None;
            }
            members.push(current);
            if members.len() > self.nodes.len() {
                return None;
            }
            current = node.right;
            if current == start {
                return Some(members);
            }
        }
    }

    /// Joins the ring containing `b` into the ring containing `a`
    ///
    /// The two rings must be disjoint.
    fn splice_rings(&mut self, a: NodeKey, b: NodeKey) {
        let a_right = self.nodes[a].right;
        let b_left = self.nodes[b].left;
        self.nodes[a].right = b;
        self.nodes[b].left = a;
        self.nodes[b_left].right = a_right;
        self.nodes[a_right].left = b_left;
    }

    /// Removes `x` from its ring, leaving it as a singleton ring
    fn unlink(&mut self, x: NodeKey) {
        let left = self.nodes[x].left;
        let right = self.nodes[x].right;
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        self.nodes[x].left = x;
        self.nodes[x].right = x;
    }

    /// Adds the ring containing `x` to the root list, next to the minimum
    fn add_root(&mut self, x: NodeKey) {
        match self.min {
            Some(min) => self.splice_rings(min, x),
            None => self.min = Some(x),
        }
    }

    fn update_min(&mut self, candidate: NodeKey) {
        let replace = match self.min {
            Some(min) => self.nodes[candidate].priority < self.nodes[min].priority,
            None => true,
        };
        if replace {
            self.min = Some(candidate);
        }
    }

    /// Consolidates the heap by linking trees of the same degree
    fn consolidate(&mut self) {
        let Some(start) = self.min else {
            return;
        };

        // Snapshot the roots; linking mutates the ring while we walk it
        let mut roots = Vec::new();
        let mut current = start;
        loop {
            roots.push(current);
            current = self.nodes[current].right;
            if current == start {
                break;
            }
        }
        let root_count = roots.len();

        let max_degree = (self.nodes.len() as f64).log(PHI) as usize + 2;
        let mut degree_table: Vec<Option<NodeKey>> = vec![None; max_degree];

        for root in roots {
            let mut x = root;
            let mut d = self.nodes[x].degree;

            loop {
                if d >= degree_table.len() {
                    degree_table.resize(d + 1, None);
                }
                let Some(mut y) = degree_table[d].take() else {
                    break;
                };

                // On a tie the root reached later in the walk stays the parent
                if self.nodes[y].priority < self.nodes[x].priority {
                    std::mem::swap(&mut x, &mut y);
                }

                self.link(y, x);
                d += 1;
            }

            degree_table[d] = Some(x);
        }

        self.min = None;
        let mut survivors = 0usize;
        for root in degree_table.into_iter().flatten() {
            survivors += 1;
            self.update_min(root);
        }

        trace!(roots = root_count, survivors, "consolidated root list");
    }

    /// Links root `y` as a child of root `x`
    fn link(&mut self, y: NodeKey, x: NodeKey) {
        debug_assert!(self.nodes[x].parent.is_none() && self.nodes[y].parent.is_none());

        self.unlink(y);
        {
            let child = &mut self.nodes[y];
            child.parent = Some(x);
            child.marked = false;
        }

        match self.nodes[x].child {
            Some(x_child) => self.splice_rings(x_child, y),
            None => self.nodes[x].child = Some(y),
        }

        self.nodes[x].degree += 1;
    }

    /// Cuts `x` from its parent `y` and adds it to the root list
    fn cut(&mut self, x: NodeKey, y: NodeKey) {
        debug_assert_eq!(self.nodes[x].parent, Some(y));
        debug_assert!(self.nodes[y].degree > 0);

        let right = self.nodes[x].right;
        if self.nodes[y].child == Some(x) {
            self.nodes[y].child = if right == x { None } else { Some(right) };
        }
        self.unlink(x);
        self.nodes[y].degree -= 1;

        self.add_root(x);
        let node = &mut self.nodes[x];
        node.parent = None;
        node.marked = false;
    }

    /// Performs cascading cut starting at `y`
    ///
    /// An unmarked non-root is marked; a marked non-root is cut and the walk
    /// continues with its former parent.
    fn cascading_cut(&mut self, y: NodeKey) {
        let mut current = y;
        while let Some(parent) = self.nodes[current].parent {
            if !self.nodes[current].marked {
                self.nodes[current].marked = true;
                return;
            }
            self.cut(current, parent);
            current = parent;
        }
    }
}

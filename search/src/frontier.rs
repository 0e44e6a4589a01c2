//! Breadth-first frontier with visited-set bookkeeping.
//!
//! Uses a `BTreeMap`-based visited set (not `HashMap`) keyed by the full
//! state, so iteration order is deterministic wherever it is observed.

use std::collections::{BTreeMap, VecDeque};

use crate::contract::SearchState;
use crate::node::SearchNodeV1;

/// FIFO frontier manager.
///
/// Maintains:
/// - A `VecDeque` of nodes awaiting expansion, in discovery order
/// - A `BTreeMap<S, u64>` from every state ever enqueued to the node that
///   first discovered it
///
/// A state enters the visited map exactly once, when it is first pushed.
/// Marking at enqueue time (not at pop time) is what keeps any state from
/// being queued twice.
pub struct BreadthFirstFrontier<S> {
    queue: VecDeque<SearchNodeV1<S>>,
    visited: BTreeMap<S, u64>,
    high_water: u64,
}

impl<S: SearchState> BreadthFirstFrontier<S> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            visited: BTreeMap::new(),
            high_water: 0,
        }
    }

    /// Push a node to the back of the queue and mark its state visited.
    ///
    /// Returns `false` if the state was already visited (node not added).
    pub fn push(&mut self, node: SearchNodeV1<S>) -> bool {
        if self.visited.contains_key(&node.state) {
            return false;
        }
        self.visited.insert(node.state.clone(), node.node_id);
        self.queue.push_back(node);
        let size = self.queue.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        true
    }

    /// Mark a state visited without queueing it.
    ///
    /// Used for the goal node, which is never expanded. Returns `false` if the
    /// state was already visited.
    pub fn mark_visited(&mut self, state: &S, node_id: u64) -> bool {
        if self.visited.contains_key(state) {
            return false;
        }
        self.visited.insert(state.clone(), node_id);
        true
    }

    /// Pop the oldest node from the front of the queue.
    #[must_use]
    pub fn pop(&mut self) -> Option<SearchNodeV1<S>> {
        self.queue.pop_front()
    }

    /// Check if a state has been visited.
    #[must_use]
    pub fn is_visited(&self, state: &S) -> bool {
        self.visited.contains_key(state)
    }

    /// The node id that first discovered `state`, if any.
    #[must_use]
    pub fn visited_by(&self, state: &S) -> Option<u64> {
        self.visited.get(state).copied()
    }

    /// Current frontier size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Number of distinct states ever visited.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

impl<S: SearchState> Default for BreadthFirstFrontier<S> {
    fn default() -> Self {
        Self::new()
    }
}

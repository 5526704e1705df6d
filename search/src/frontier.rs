//! FIFO frontier with `(state, depth)` loop detection.
//!
//! The visited set is ordered; no search result depends on hasher state.

use std::collections::{BTreeSet, VecDeque};

use blocks_kernel::canon::key::CanonicalKey;

use crate::recorder::NodeId;

/// Breadth-first frontier.
///
/// Maintains:
/// - a `VecDeque` of node ids awaiting expansion, in discovery order
/// - a `BTreeSet` of `(canonical key, depth)` pairs already discovered
/// - the queue-length high-water mark
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<NodeId>,
    visited: BTreeSet<(CanonicalKey, u32)>,
    high_water: u64,
}

impl Frontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `(key, depth)` pair. Returns `false` if it was already seen.
    ///
    /// The same configuration at a different depth is a distinct entry.
    pub fn discover(&mut self, key: CanonicalKey, depth: u32) -> bool {
        self.visited.insert((key, depth))
    }

    /// Enqueue a node.
    pub fn push(&mut self, id: NodeId) {
        self.queue.push_back(id);
        let size = self.queue.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Dequeue the oldest node.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.queue.pop_front()
    }

    /// Queued ids, oldest first.
    pub fn queued(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.queue.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Number of distinct `(key, depth)` pairs seen.
    #[must_use]
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }
}

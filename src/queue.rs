//! Pending-navigation buffer.
//!
//! [`RoutingQueue`] is the ordered hand-off between the synchronous enqueue
//! path (bridge events, [`navigate_to`](crate::Router::navigate_to)) and
//! the asynchronous drain loop. Ordering is strict FIFO. The capacity given
//! at construction is a pre-allocation hint, not a cap: a navigation burst
//! past the hint grows the buffer rather than dropping or displacing
//! entries, so dispatch never skips a route change.

use std::collections::VecDeque;

use crate::location::LocationSnapshot;

/// Default capacity hint for a router's queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 20;

/// FIFO buffer of captured navigation snapshots.
#[derive(Debug)]
pub struct RoutingQueue {
    entries: VecDeque<LocationSnapshot>,
    capacity_hint: usize,
}

impl RoutingQueue {
    /// Queue pre-allocated for [`DEFAULT_QUEUE_CAPACITY`] snapshots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// Queue pre-allocated for `capacity` snapshots.
    ///
    /// The hint sizes the initial allocation only; pushing past it grows
    /// the buffer.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity_hint: capacity,
        }
    }

    /// Append a snapshot at the tail.
    pub fn push(&mut self, snapshot: LocationSnapshot) {
        self.entries.push_back(snapshot);
    }

    /// Remove and return the oldest snapshot, or `None` when empty.
    pub fn pop(&mut self) -> Option<LocationSnapshot> {
        self.entries.pop_front()
    }

    /// Number of snapshots waiting.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The capacity hint given at construction.
    pub fn capacity_hint(&self) -> usize {
        self.capacity_hint
    }
}

impl Default for RoutingQueue {
    fn default() -> Self {
        Self::new()
    }
}

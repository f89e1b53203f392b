//! LRU Tracker Module
//!
//! Recency ordering used to pick which cached response to drop when the
//! in-process store is full.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Keys ordered by last access: front is most recent, back is least recent.
#[derive(Debug, Default)]
pub struct LruTracker {
    order: VecDeque<String>,
}

impl LruTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks `key` as the most recently used one.
    pub fn touch(&mut self, key: &str) {
        if self.order.front().map(String::as_str) == Some(key) {
            return;
        }
        self.remove(key);
        self.order.push_front(key.to_owned());
    }

    /// Stops tracking `key`. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }

    // == Eviction ==
    /// Removes and returns the least recently used key.
    pub fn pop_least_recent(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    /// The key `pop_least_recent` would return next.
    #[cfg(test)]
    pub(crate) fn least_recent(&self) -> Option<&str> {
        self.order.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}

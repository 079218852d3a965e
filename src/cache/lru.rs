//! Recency Module
//!
//! Access order of cached keys, used to pick the eviction victim when a
//! bounded store is full.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Keys ordered from least recently used (front) to most recently used
/// (back). Each key appears at most once.
///
/// `record_access` and `forget` are linear in the number of tracked keys and
/// run under the store lock on every hit. Bounds must stay small: the flag
/// caches hold one entry per key and the slot caches are capped at
/// [`MAX_NEXT_FREE_SLOT_MAX_SIZE`] by [`Config`].
///
/// [`MAX_NEXT_FREE_SLOT_MAX_SIZE`]: crate::config::MAX_NEXT_FREE_SLOT_MAX_SIZE
/// [`Config`]: crate::config::Config
#[derive(Debug)]
pub struct LruTracker<K> {
    queue: VecDeque<K>,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<K: PartialEq + Clone> LruTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Access ==
    /// Moves `key` to the most-recent end, inserting it if unseen.
    pub fn record_access(&mut self, key: &K) {
        self.forget(key);
        self.queue.push_back(key.clone());
    }

    /// Drops `key` from the order; unknown keys are ignored.
    pub fn forget(&mut self, key: &K) {
        if let Some(pos) = self.queue.iter().position(|tracked| tracked == key) {
            self.queue.remove(pos);
        }
    }

    // == Pop Least Recent ==
    /// Removes and returns the eviction victim.
    pub fn pop_least_recent(&mut self) -> Option<K> {
        self.queue.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<K: PartialEq + Clone>(order: &mut LruTracker<K>) -> Vec<K> {
        std::iter::from_fn(|| order.pop_least_recent()).collect()
    }

    #[test]
    fn test_empty_tracker_has_no_victim() {
        let mut order: LruTracker<u32> = LruTracker::new();
        assert_eq!(order.pop_least_recent(), None);
    }

    #[test]
    fn test_access_refreshes_position() {
        let mut order = LruTracker::new();
        for location in [10, 20, 30, 10] {
            order.record_access(&location);
        }

        assert_eq!(drain(&mut order), vec![20, 30, 10]);
    }

    #[test]
    fn test_victims_come_out_oldest_first() {
        let mut order = LruTracker::new();
        for disease in ["covid", "mpox", "fsme", "covid"] {
            order.record_access(&disease);
        }

        assert_eq!(drain(&mut order), vec!["mpox", "fsme", "covid"]);
    }

    #[test]
    fn test_forget_composite_keys() {
        let mut order = LruTracker::new();
        order.record_access(&(1, 'b'));
        order.record_access(&(2, 'b'));

        order.forget(&(1, 'b'));
        order.forget(&(3, 'b'));

        assert_eq!(drain(&mut order), vec![(2, 'b')]);
    }

    #[test]
    fn test_repeated_access_keeps_one_slot() {
        let mut order = LruTracker::new();
        for _ in 0..3 {
            order.record_access(&7);
        }
        assert_eq!(drain(&mut order), vec![7]);
    }
}

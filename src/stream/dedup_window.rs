use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// Sliding window over the most recently accepted items.
///
/// An item is accepted when it is not among the last `capacity` accepted items.
/// Accepting an item into a full window evicts the oldest one first, so memory stays
/// bounded by `capacity` whatever the length of the stream. A capacity of 0 turns the
/// window into a pass-through that keeps no state at all.
///
/// The ring buffer keeps arrival order for eviction and the set answers membership,
/// both are updated together so `consider` is O(1) amortized.
#[derive(Debug, Clone)]
pub struct DedupWindow<T: Hash + Eq + Clone> {
    capacity: usize,
    order: VecDeque<T>,
    members: HashSet<T>,
}

impl<T: Hash + Eq + Clone> DedupWindow<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity.min(4096)),
            members: HashSet::with_capacity(capacity.min(4096)),
        }
    }

    /// Returns true and records `item` if it was not seen within the window.
    /// Returns false without touching the window otherwise.
    pub fn consider(&mut self, item: &T) -> bool {
        if self.capacity == 0 {
            return true;
        }
        if self.members.contains(item) {
            return false;
        }

        if self.order.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.members.remove(&oldest);
            }
        }
        self.order.push_back(item.clone());
        self.members.insert(item.clone());
        true
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_window_is_pass_through() {
        let mut window = DedupWindow::new(0);
        assert!(window.consider(&"a"));
        assert!(window.consider(&"a"));
        assert!(window.is_empty());
        assert!(!window.is_enabled());
    }

    #[test]
    fn test_duplicate_within_window_is_rejected() {
        let mut window = DedupWindow::new(10);
        assert!(window.consider(&"a"));
        assert!(!window.consider(&"a"));
        assert!(window.consider(&"b"));
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn test_oldest_entry_is_evicted() {
        let mut window = DedupWindow::new(2);
        assert!(window.consider(&1));
        assert!(window.consider(&2));
        assert!(window.consider(&3));
        assert_eq!(window.len(), 2);

        // 1 fell out of the window, 2 and 3 are still in it
        assert!(window.consider(&1));
        assert!(!window.consider(&3));
        assert!(window.consider(&2));
    }

    #[test]
    fn test_rejection_does_not_refresh_recency() {
        let mut window = DedupWindow::new(2);
        assert!(window.consider(&"x"));
        assert!(window.consider(&"y"));
        assert!(!window.consider(&"x"));
        assert!(window.consider(&"z"));
        assert!(window.consider(&"x"));
    }

    #[test]
    fn test_window_of_one() {
        let mut window = DedupWindow::new(1);
        assert!(window.consider(&"a"));
        assert!(!window.consider(&"a"));
        assert!(window.consider(&"b"));
        assert!(window.consider(&"a"));
        assert_eq!(window.len(), 1);
    }
}

//! # Ordered, duplicate-free subscriber registry.
//!
//! [`Registry`] keeps handles in subscription order. Each handle is keyed by a
//! monotonically increasing insertion sequence, so moving a handle to the back is
//! a remove + insert under a fresh sequence.
//!
//! ## Complexity
//! ```text
//! insert / remove / move_to_back / pop_first / pop_last   O(log n)
//! contains                                                O(1)
//! iter / snapshot                                         O(n)
//! ```

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Ordered set of subscriber handles.
#[derive(Clone, Debug)]
pub struct Registry<H> {
    order: BTreeMap<u64, H>,
    index: HashMap<H, u64>,
    next_seq: u64,
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self {
            order: BTreeMap::new(),
            index: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<H: Copy + Eq + Hash> Registry<H> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered handles.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no handle is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if `handle` is registered.
    #[inline]
    pub fn contains(&self, handle: H) -> bool {
        self.index.contains_key(&handle)
    }

    /// Appends `handle` at the back. Returns `false` (and changes nothing) if already present.
    pub fn insert(&mut self, handle: H) -> bool {
        if self.index.contains_key(&handle) {
            return false;
        }
        self.push_back(handle);
        true
    }

    /// Removes `handle`. Returns `false` if it was not registered.
    pub fn remove(&mut self, handle: H) -> bool {
        match self.index.remove(&handle) {
            Some(seq) => {
                self.order.remove(&seq);
                true
            }
            None => false,
        }
    }

    /// Moves `handle` to the most-recently-subscribed position, registering it if absent.
    pub fn move_to_back(&mut self, handle: H) {
        if let Some(seq) = self.index.remove(&handle) {
            self.order.remove(&seq);
        }
        self.push_back(handle);
    }

    /// Oldest handle.
    pub fn first(&self) -> Option<H> {
        self.order.first_key_value().map(|(_, h)| *h)
    }

    /// Newest handle.
    pub fn last(&self) -> Option<H> {
        self.order.last_key_value().map(|(_, h)| *h)
    }

    /// Removes and returns the oldest handle.
    pub fn pop_first(&mut self) -> Option<H> {
        let (_, handle) = self.order.pop_first()?;
        self.index.remove(&handle);
        Some(handle)
    }

    /// Removes and returns the newest handle.
    pub fn pop_last(&mut self) -> Option<H> {
        let (_, handle) = self.order.pop_last()?;
        self.index.remove(&handle);
        Some(handle)
    }

    /// Iterates handles in subscription order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = H> + '_ {
        self.order.values().copied()
    }

    /// Copies the handles in subscription order.
    pub fn snapshot(&self) -> Vec<H> {
        self.iter().collect()
    }

    fn push_back(&mut self, handle: H) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, handle);
        self.index.insert(handle, seq);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut reg = Registry::new();
        assert!(reg.insert(1));
        assert!(!reg.insert(1), "second insert must be a no-op");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut reg = Registry::new();
        reg.insert(1);
        assert!(!reg.remove(7));
        assert_eq!(reg.snapshot(), [1]);
    }

    #[test]
    fn test_preserves_subscription_order() {
        let mut reg = Registry::new();
        for h in [3, 1, 2] {
            reg.insert(h);
        }
        assert_eq!(reg.snapshot(), [3, 1, 2]);
        assert_eq!(reg.first(), Some(3));
        assert_eq!(reg.last(), Some(2));
    }

    #[test]
    fn test_move_to_back() {
        let mut reg = Registry::new();
        for h in [1, 2, 3] {
            reg.insert(h);
        }
        reg.move_to_back(1);
        assert_eq!(reg.snapshot(), [2, 3, 1]);

        reg.move_to_back(9);
        assert_eq!(reg.snapshot(), [2, 3, 1, 9], "absent handle is appended");
    }

    #[test]
    fn test_pop_both_ends() {
        let mut reg = Registry::new();
        for h in [1, 2, 3] {
            reg.insert(h);
        }
        assert_eq!(reg.pop_last(), Some(3));
        assert_eq!(reg.pop_first(), Some(1));
        assert!(!reg.contains(1) && !reg.contains(3));
        assert_eq!(reg.snapshot(), [2]);
        assert_eq!(reg.pop_last(), Some(2));
        assert_eq!(reg.pop_last(), None);
    }
}

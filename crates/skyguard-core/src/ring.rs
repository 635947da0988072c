//! Fixed-capacity FIFO buffer with explicit oldest-first eviction.
//!
//! Used for score history, the world snapshot history and the alert log.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingBuffer<T> {
    capacity: usize,
    items: VecDeque<T>,
}

impl<T> RingBuffer<T> {
    /// Create an empty buffer. A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Append an item, returning the evicted oldest item when full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Oldest item.
    pub fn oldest(&self) -> Option<&T> {
        self.items.front()
    }

    /// Newest item.
    pub fn newest(&self) -> Option<&T> {
        self.items.back()
    }

    /// Item `steps_back` positions behind the newest (0 = newest).
    pub fn from_newest(&self, steps_back: usize) -> Option<&T> {
        let len = self.items.len();
        if steps_back >= len {
            return None;
        }
        self.items.get(len - 1 - steps_back)
    }

    /// Iterate oldest-first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    /// Drop every item newer than `steps_back` positions behind the newest.
    pub fn truncate_newest(&mut self, steps_back: usize) {
        let keep = self.items.len().saturating_sub(steps_back);
        self.items.truncate(keep);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Copy contents oldest-first.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_evicts_oldest_when_full() {
        let mut ring = RingBuffer::new(3);
        assert_eq!(ring.push(1), None);
        assert_eq!(ring.push(2), None);
        assert_eq!(ring.push(3), None);
        assert_eq!(ring.push(4), Some(1));
        assert_eq!(ring.to_vec(), vec![2, 3, 4]);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_from_newest() {
        let mut ring = RingBuffer::new(4);
        for i in 0..4 {
            ring.push(i);
        }
        assert_eq!(ring.from_newest(0), Some(&3));
        assert_eq!(ring.from_newest(3), Some(&0));
        assert_eq!(ring.from_newest(4), None);
    }

    #[test]
    fn test_truncate_newest() {
        let mut ring = RingBuffer::new(5);
        for i in 0..5 {
            ring.push(i);
        }
        ring.truncate_newest(2);
        assert_eq!(ring.to_vec(), vec![0, 1, 2]);
        ring.truncate_newest(10);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut ring = RingBuffer::new(0);
        ring.push('a');
        ring.push('b');
        assert_eq!(ring.capacity(), 1);
        assert_eq!(ring.to_vec(), vec!['b']);
    }
}

//! `BoundedHistory`: fixed-capacity sample buffer, oldest discarded first.

use std::collections::VecDeque;

/// A ring of the most recent `capacity` samples.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundedHistory<T> {
    samples:  VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be positive");
        Self { samples: VecDeque::with_capacity(capacity), capacity }
    }

    /// Append `sample`, evicting the oldest one when full.
    pub fn push(&mut self, sample: T) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Oldest-first iteration.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&T> {
        self.samples.back()
    }

    /// Number of samples satisfying `pred`.
    pub fn count_where(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.samples.iter().filter(|s| pred(s)).count()
    }
}

impl<T: Clone> BoundedHistory<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.samples.iter().cloned().collect()
    }
}

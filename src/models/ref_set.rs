//! Ordered, duplicate-free reference container
//!
//! Reference lists are appended while scanning and sorted once scanning is
//! done. Membership goes through a hash set so repeated inserts stay O(1).

use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::hash::Hash;

/// Insertion-ordered set with an explicit sort step
#[derive(Debug, Clone)]
pub struct RefSet<T> {
    items: Vec<T>,
    index: HashSet<T>,
}

impl<T: Copy + Eq + Hash> RefSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// Insert an item, returning `true` if it was not already present
    pub fn insert(&mut self, item: T) -> bool {
        if self.index.insert(item) {
            self.items.push(item);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in the current order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Reorder the items with a comparator; membership is unaffected
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        self.items.sort_by(compare);
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }
}

impl<T: Copy + Eq + Hash> Default for RefSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Eq + Hash> FromIterator<T> for RefSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = RefSet::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl<'a, T: Copy + Eq + Hash> IntoIterator for &'a RefSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Serialize> Serialize for RefSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

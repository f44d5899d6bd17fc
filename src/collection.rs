//! Ordered, index-addressable entity container with a per-format capacity
//! ceiling and, for some entity kinds, a minimum of one element.
//!
//! The collection knows nothing about cross-entity references; callers that
//! move or delete slots run the reference transforms in [`crate::refs`] around
//! these operations.

use std::ops::{Index, IndexMut};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CollectionError {
    #[error("collection is at capacity ({0})")]
    Full(usize),
    #[error("collection is empty")]
    Empty,
    #[error("set_count would truncate existing entries")]
    WouldTruncate,
    #[error("index {index} out of bounds (len {len})")]
    OutOfBounds { index: usize, len: usize },
}

/// Bounded, ordered collection. `min_count` entries always exist; removing the
/// last required entry re-initializes it to `T::default()` instead of leaving
/// the collection short.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedCollection<T> {
    items: Vec<T>,
    capacity: usize,
    min_count: usize,
}

impl<T: Default> BoundedCollection<T> {
    pub fn new(capacity: usize, min_count: usize) -> Self {
        debug_assert!(min_count <= capacity);
        let mut items = Vec::with_capacity(min_count);
        items.resize_with(min_count, T::default);
        BoundedCollection { items, capacity, min_count }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn min_count(&self) -> usize {
        self.min_count
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Append a default-initialized entry; returns its index.
    pub fn add(&mut self) -> Result<usize, CollectionError> {
        self.push(T::default())
    }

    pub fn push(&mut self, item: T) -> Result<usize, CollectionError> {
        if self.is_full() {
            return Err(CollectionError::Full(self.capacity));
        }
        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    pub fn insert(&mut self, index: usize, item: T) -> Result<usize, CollectionError> {
        if self.is_full() {
            return Err(CollectionError::Full(self.capacity));
        }
        if index > self.items.len() {
            return Err(CollectionError::OutOfBounds { index, len: self.items.len() });
        }
        self.items.insert(index, item);
        Ok(index)
    }

    /// Remove the entry at `index`. When the collection is at its minimum
    /// count, the slot is reset to `T::default()` instead. Returns the new
    /// length.
    pub fn remove_at(&mut self, index: usize) -> Result<usize, CollectionError> {
        if self.items.is_empty() {
            return Err(CollectionError::Empty);
        }
        if index >= self.items.len() {
            return Err(CollectionError::OutOfBounds { index, len: self.items.len() });
        }
        if self.items.len() <= self.min_count {
            self.items[index] = T::default();
        } else {
            self.items.remove(index);
        }
        Ok(self.items.len())
    }

    /// Grow or shrink to exactly `n` entries. Shrinking discards trailing
    /// entries and requires `allow_truncate`.
    pub fn set_count(&mut self, n: usize, allow_truncate: bool) -> Result<(), CollectionError> {
        if n > self.capacity {
            return Err(CollectionError::Full(self.capacity));
        }
        if n < self.min_count {
            return Err(CollectionError::Empty);
        }
        if n < self.items.len() && !allow_truncate {
            return Err(CollectionError::WouldTruncate);
        }
        self.items.resize_with(n, T::default);
        Ok(())
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Index<usize> for BoundedCollection<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for BoundedCollection<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a BoundedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut BoundedCollection<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

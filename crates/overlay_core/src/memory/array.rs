//! # Fixed Array
//!
//! Append-only, capacity-bounded store addressed by position.

use std::ops::{Index, IndexMut};

use thiserror::Error;

/// Returned when appending to a full [`FixedArray`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("capacity of {capacity} slots exhausted")]
pub struct CapacityError {
    /// The array's fixed capacity.
    pub capacity: usize,
}

/// An append-only array with `N` pre-allocated slots and a used-length counter.
///
/// Records are appended at the current length and addressed by the index
/// `add` returned. Indices stay stable until [`FixedArray::clear`], which
/// resets the length without releasing the slots.
///
/// # Example
///
/// ```rust
/// use overlay_core::FixedArray;
///
/// let mut ids: FixedArray<u32, 2> = FixedArray::new();
/// ids.add(7).unwrap();
/// ids.add(9).unwrap();
/// assert!(ids.add(11).is_err());
///
/// ids.clear();
/// assert!(ids.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct FixedArray<T, const N: usize> {
    /// Slot storage, always `N` long.
    slots: Box<[T]>,
    /// Number of slots in use.
    len: usize,
}

impl<T: Default, const N: usize> FixedArray<T, N> {
    /// Creates an empty array with all `N` slots pre-allocated.
    #[must_use]
    pub fn new() -> Self {
        let slots: Vec<T> = (0..N).map(|_| T::default()).collect();

        Self {
            slots: slots.into_boxed_slice(),
            len: 0,
        }
    }

    /// Appends a value, returning its index and a reference to the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if all `N` slots are in use.
    pub fn add(&mut self, value: T) -> Result<(usize, &mut T), CapacityError> {
        if self.len == N {
            return Err(CapacityError { capacity: N });
        }

        let index = self.len;
        self.len += 1;

        let slot = &mut self.slots[index];
        *slot = value;
        Ok((index, slot))
    }

    /// Logically empties the array.
    ///
    /// Stale records are reset to their default so a later `add` never
    /// observes the previous occupant.
    pub fn clear(&mut self) {
        for slot in &mut self.slots[..self.len] {
            *slot = T::default();
        }
        self.len = 0;
    }
}

impl<T, const N: usize> FixedArray<T, N> {
    /// Total number of slots.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of slots in use.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no slot is in use.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Gets a record by index, or `None` past the used length.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Gets a mutable record by index, or `None` past the used length.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// The used records, in index order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.slots[..self.len]
    }

    /// The used records, mutably, in index order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.slots[..self.len]
    }

    /// Iterates the used records in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterates the used records mutably in index order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: Default, const N: usize> Default for FixedArray<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Index<usize> for FixedArray<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for FixedArray<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a FixedArray<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

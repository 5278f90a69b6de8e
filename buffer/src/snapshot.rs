//! Point-in-time copies of ring contents.

use serde::Serialize;

use crate::config::OverflowPolicy;
use crate::sample::Sample;

/// A consistent copy of a ring buffer taken under its lock.
///
/// A snapshot carries the live elements (oldest first) and the pointer
/// positions at the time it was taken. It never holds the values of slots
/// outside the live window, so visualizers and debug tooling can walk it
/// freely. Iteration can be restarted any number of times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<T> {
    capacity: usize,
    head: usize,
    tail: usize,
    policy: OverflowPolicy,
    strict: bool,
    items: Vec<T>,
}

impl<T: Sample> Snapshot<T> {
    pub(crate) fn new(
        capacity: usize,
        head: usize,
        tail: usize,
        policy: OverflowPolicy,
        strict: bool,
        items: Vec<T>,
    ) -> Self {
        Snapshot {
            capacity,
            head,
            tail,
            policy,
            strict,
            items,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    /// Next write slot.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Next read slot.
    pub fn tail(&self) -> usize {
        self.tail
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Live elements, oldest first.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, T>> {
        self.items.iter().copied()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// One entry per physical slot: the element held there if the slot is
    /// inside the live window, `None` otherwise.
    pub fn slots(&self) -> impl Iterator<Item = Option<T>> + '_ {
        (0..self.capacity).map(move |slot| {
            let offset = (slot + self.capacity - self.tail) % self.capacity;
            self.items.get(offset).copied()
        })
    }
}

impl<'a, T: Sample> IntoIterator for &'a Snapshot<T> {
    type Item = T;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Snapshot<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

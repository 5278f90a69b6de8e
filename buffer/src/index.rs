//! Wraparound index arithmetic.

/// Pointer arithmetic for a ring of fixed capacity.
///
/// When the capacity is a power of two the wrap is a mask, otherwise a
/// modulo. Both paths give the same result for every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Wrap {
    capacity: usize,
    // `capacity - 1` when capacity is a power of two.
    mask: Option<usize>,
}

impl Wrap {
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "capacity must be greater than 0");
        Wrap {
            capacity,
            mask: capacity.is_power_of_two().then(|| capacity - 1),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn is_power_of_two(&self) -> bool {
        self.mask.is_some()
    }

    /// Moves `pointer` forward by `step` slots. `pointer` must already be in
    /// `[0, capacity)`.
    #[inline]
    pub(crate) fn advance(&self, pointer: usize, step: usize) -> usize {
        match self.mask {
            Some(mask) => pointer.wrapping_add(step) & mask,
            None => (pointer + step % self.capacity) % self.capacity,
        }
    }
}

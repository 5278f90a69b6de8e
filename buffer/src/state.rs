//! Unsynchronized ring state.
//!
//! [`RingState`] holds the storage and pointers of a ring buffer and
//! implements every algorithm on `&mut self`. [`crate::RingBuffer`] wraps it
//! in a mutex so that each public call runs to completion under the lock.

use tracing::{debug, trace};

use crate::config::{OverflowPolicy, RingConfig};
use crate::error::{Result, RingError};
use crate::index::Wrap;
use crate::sample::Sample;
use crate::snapshot::Snapshot;

pub(crate) struct RingState<T> {
    storage: Box<[T]>,
    wrap: Wrap,
    head: usize, // next write slot
    tail: usize, // next read slot
    size: usize, // live elements; resolves head == tail
    policy: OverflowPolicy,
    strict: bool,
}

impl<T: Sample> RingState<T> {
    pub(crate) fn new(capacity: usize, policy: OverflowPolicy, strict: bool) -> Result<Self> {
        if capacity == 0 {
            return Err(RingError::Configuration(
                "capacity must be greater than 0".into(),
            ));
        }
        Ok(RingState {
            storage: vec![T::default(); capacity].into_boxed_slice(),
            wrap: Wrap::new(capacity),
            head: 0,
            tail: 0,
            size: 0,
            policy,
            strict,
        })
    }

    /// Builds a ring from a configuration and pre-loads `items` with
    /// sequential enqueues.
    pub(crate) fn with_items(config: &RingConfig, items: &[T]) -> Result<Self> {
        let capacity = match config.capacity {
            Some(capacity) => capacity,
            None if items.is_empty() => {
                return Err(RingError::Configuration(
                    "capacity or initial items must be given".into(),
                ));
            }
            None => items.len(),
        };

        let mut state = Self::new(capacity, config.policy, config.strict)?;
        if items.len() > capacity && config.strict {
            return Err(RingError::Configuration(format!(
                "{} initial items exceed capacity {}",
                items.len(),
                capacity
            )));
        }
        for &item in items {
            state.enqueue(item)?;
        }
        Ok(state)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.wrap.capacity()
    }

    pub(crate) fn len(&self) -> usize {
        self.size
    }

    pub(crate) fn head(&self) -> usize {
        self.head
    }

    pub(crate) fn tail(&self) -> usize {
        self.tail
    }

    pub(crate) fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub(crate) fn is_strict(&self) -> bool {
        self.strict
    }

    pub(crate) fn is_power_of_two(&self) -> bool {
        self.wrap.is_power_of_two()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub(crate) fn is_full(&self) -> bool {
        self.size == self.capacity()
    }

    pub(crate) fn free_space(&self) -> usize {
        self.capacity() - self.size
    }

    pub(crate) fn peek(&self) -> Result<T> {
        if self.is_empty() {
            return self.empty_read("peek");
        }
        Ok(self.storage[self.tail])
    }

    pub(crate) fn enqueue(&mut self, value: T) -> Result<()> {
        if self.is_full() {
            match self.policy {
                OverflowPolicy::Reject => {
                    if self.strict {
                        return Err(self.capacity_exceeded(1));
                    }
                    trace!(capacity = self.capacity(), "ring full, value dropped");
                    return Ok(());
                }
                OverflowPolicy::Overwrite => {
                    self.tail = self.wrap.advance(self.tail, 1);
                    self.size -= 1;
                }
                OverflowPolicy::Grow => self.grow(None)?,
            }
        }

        self.storage[self.head] = value;
        self.head = self.wrap.advance(self.head, 1);
        self.size += 1;
        Ok(())
    }

    pub(crate) fn dequeue(&mut self) -> Result<T> {
        if self.is_empty() {
            return self.empty_read("dequeue");
        }
        let value = self.storage[self.tail];
        self.consume(1);
        Ok(value)
    }

    /// Writes as many of `values` as the policy admits and returns how many
    /// were accepted.
    pub(crate) fn bulk_enqueue(&mut self, values: &[T]) -> Result<usize> {
        let n = values.len();
        if n == 0 {
            return Ok(0);
        }

        let space = self.free_space();
        let mut values = values;
        if n > space {
            match self.policy {
                OverflowPolicy::Grow => {
                    let target = self.capacity().saturating_mul(2).max(self.size + n);
                    self.grow(Some(target))?;
                }
                OverflowPolicy::Overwrite => {
                    let capacity = self.capacity();
                    let evicted = if n >= capacity {
                        // Only the newest `capacity` values survive. Skip the
                        // write slots the dropped prefix would have used so
                        // the pointers match a run of single enqueues.
                        let skip = n - capacity;
                        values = &values[skip..];
                        let evicted = self.size;
                        self.head = self.wrap.advance(self.head, skip);
                        self.tail = self.head;
                        self.size = 0;
                        evicted
                    } else {
                        let overflow = n - space;
                        self.consume(overflow);
                        overflow
                    };
                    debug!(evicted, incoming = n, capacity, "ring overwrite");
                }
                OverflowPolicy::Reject => {
                    if self.strict {
                        return Err(self.capacity_exceeded(n));
                    }
                    trace!(
                        requested = n,
                        accepted = space,
                        "ring full, values truncated"
                    );
                    values = &values[..space];
                }
            }
        }

        let accepted = values.len();
        self.write_runs(values);
        Ok(accepted)
    }

    /// Removes up to `amount` elements, oldest first.
    pub(crate) fn bulk_dequeue(&mut self, amount: usize) -> Vec<T> {
        let count = amount.min(self.size);
        let mut out = Vec::with_capacity(count);
        if count == 0 {
            return out;
        }

        let (first, second) = self.live_runs(count);
        out.extend_from_slice(first);
        out.extend_from_slice(second);
        self.consume(count);
        out
    }

    /// Removes up to `out.len()` elements into `out` and returns the count.
    pub(crate) fn bulk_dequeue_into(&mut self, out: &mut [T]) -> usize {
        let count = out.len().min(self.size);
        if count == 0 {
            return 0;
        }

        let (first, second) = self.live_runs(count);
        out[..first.len()].copy_from_slice(first);
        out[first.len()..count].copy_from_slice(second);
        self.consume(count);
        count
    }

    /// Drops up to `n` of the oldest elements and returns how many went.
    pub(crate) fn discard(&mut self, n: usize) -> usize {
        let count = n.min(self.size);
        self.consume(count);
        count
    }

    pub(crate) fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.size = 0;
    }

    /// Relinearizes into new storage. Ignored unless the policy is
    /// [`OverflowPolicy::Grow`].
    pub(crate) fn resize(&mut self, new_capacity: Option<usize>) -> Result<()> {
        if self.policy != OverflowPolicy::Grow {
            trace!(policy = %self.policy, "resize ignored");
            return Ok(());
        }
        self.grow(new_capacity)
    }

    /// Live elements in logical order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = T> + '_ {
        let (first, second) = self.live_runs(self.size);
        first.iter().chain(second.iter()).copied()
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        let (first, second) = self.live_runs(self.size);
        let mut out = Vec::with_capacity(self.size);
        out.extend_from_slice(first);
        out.extend_from_slice(second);
        out
    }

    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        Snapshot::new(
            self.capacity(),
            self.head,
            self.tail,
            self.policy,
            self.strict,
            self.to_vec(),
        )
    }

    fn grow(&mut self, target: Option<usize>) -> Result<()> {
        let old_capacity = self.capacity();
        let doubled = old_capacity.saturating_mul(2).max(self.size + 1);
        let new_capacity = target.unwrap_or(doubled);
        if new_capacity == 0 {
            return Err(RingError::InvalidArgument(
                "capacity must be greater than 0".into(),
            ));
        }
        if new_capacity < self.size {
            return Err(RingError::InvalidArgument(format!(
                "capacity {} is below current size {}",
                new_capacity, self.size
            )));
        }

        let mut storage = vec![T::default(); new_capacity].into_boxed_slice();
        let (first, second) = self.live_runs(self.size);
        storage[..first.len()].copy_from_slice(first);
        storage[first.len()..self.size].copy_from_slice(second);

        self.storage = storage;
        self.wrap = Wrap::new(new_capacity);
        self.tail = 0;
        self.head = self.wrap.advance(0, self.size);

        debug!(old_capacity, new_capacity, size = self.size, "ring resized");
        Ok(())
    }

    /// The first `count` live elements as at most two contiguous runs:
    /// `[tail, tail + first)` and `[0, count - first)`.
    fn live_runs(&self, count: usize) -> (&[T], &[T]) {
        debug_assert!(count <= self.size);
        let first = count.min(self.capacity() - self.tail);
        (
            &self.storage[self.tail..self.tail + first],
            &self.storage[..count - first],
        )
    }

    /// Copies `values` into free slots starting at `head`, in at most two
    /// runs. Callers guarantee `values.len() <= free_space()`.
    fn write_runs(&mut self, values: &[T]) {
        let count = values.len();
        debug_assert!(count <= self.free_space());
        let first = count.min(self.capacity() - self.head);
        let (front, back) = values.split_at(first);
        let head = self.head;
        self.storage[head..head + first].copy_from_slice(front);
        self.storage[..back.len()].copy_from_slice(back);
        self.head = self.wrap.advance(self.head, count);
        self.size += count;
    }

    fn consume(&mut self, count: usize) {
        self.tail = self.wrap.advance(self.tail, count);
        self.size -= count;
    }

    fn empty_read(&self, op: &'static str) -> Result<T> {
        if self.strict {
            return Err(RingError::Empty);
        }
        trace!(op, "read from empty ring, returning default");
        Ok(T::default())
    }

    fn capacity_exceeded(&self, requested: usize) -> RingError {
        RingError::CapacityExceeded {
            capacity: self.capacity(),
            requested,
            available: self.free_space(),
        }
    }
}

//! Lock-guarded ring buffer.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::{OverflowPolicy, RingConfig};
use crate::error::Result;
use crate::sample::Sample;
use crate::snapshot::Snapshot;
use crate::state::RingState;

/// A fixed-capacity ring buffer of numeric samples.
///
/// `RingBuffer<T>` is a monitor: every method takes the buffer's lock for
/// its whole duration, including `resize`, so operations never interleave.
/// Cloning is cheap and shares the same buffer, which makes it easy to hand
/// one end to a producer thread and the other to a consumer.
///
/// # Semantics
///
/// - **Write when full**: decided by the [`OverflowPolicy`] chosen at
///   construction (reject, overwrite oldest, or grow)
/// - **Read when empty**: strict buffers return [`crate::RingError::Empty`];
///   non-strict buffers return `T::default()` and change nothing
/// - **Bulk**: `bulk_enqueue`/`bulk_dequeue` copy at most two contiguous runs
///   and leave the buffer exactly as the equivalent single-element calls
///   would
///
/// Nothing blocks except lock acquisition. Callers that need bounded waiting
/// or wakeups build them on top.
///
/// # Example
///
/// ```
/// use circq_buffer::{OverflowPolicy, RingBuffer, RingConfig};
///
/// // Keep the 4 most recent samples
/// let config = RingConfig::new(4).policy(OverflowPolicy::Overwrite);
/// let buf = RingBuffer::<i16>::with_config(config).unwrap();
///
/// buf.bulk_enqueue(&[1, 2, 3, 4, 5, 6]).unwrap();
/// assert_eq!(buf.size(), 4);
/// assert_eq!(buf.bulk_dequeue(4), vec![3, 4, 5, 6]);
/// ```
pub struct RingBuffer<T> {
    inner: Arc<Mutex<RingState<T>>>,
}

impl<T> Clone for RingBuffer<T> {
    fn clone(&self) -> Self {
        RingBuffer {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Sample> RingBuffer<T> {
    /// Creates an empty buffer with the reject policy in non-strict mode.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(RingConfig::new(capacity))
    }

    /// Creates an empty buffer from a configuration.
    pub fn with_config(config: RingConfig) -> Result<Self> {
        Self::with_items(config, &[])
    }

    /// Creates a buffer pre-loaded with `items` through sequential enqueues.
    ///
    /// When `config.capacity` is unset the capacity is `items.len()`. A
    /// strict configuration fails if `items` does not fit; otherwise the
    /// overflow policy decides what happens to the excess.
    pub fn with_items(config: RingConfig, items: &[T]) -> Result<Self> {
        let state = RingState::with_items(&config, items)?;
        Ok(RingBuffer {
            inner: Arc::new(Mutex::new(state)),
        })
    }

    /// Creates a full buffer whose capacity is the length of `items`.
    pub fn from_items(items: &[T]) -> Result<Self> {
        Self::with_items(RingConfig::default(), items)
    }

    /// Returns the oldest element without removing it.
    ///
    /// On an empty non-strict buffer the result is `T::default()`; it is
    /// never a stale value from storage.
    pub fn peek(&self) -> Result<T> {
        self.inner.lock().peek()
    }

    /// Appends one element, applying the overflow policy if full.
    pub fn enqueue(&self, value: T) -> Result<()> {
        self.inner.lock().enqueue(value)
    }

    /// Removes and returns the oldest element.
    ///
    /// On an empty non-strict buffer this returns `T::default()` and leaves
    /// the buffer unchanged.
    pub fn dequeue(&self) -> Result<T> {
        self.inner.lock().dequeue()
    }

    /// Appends a run of elements and returns how many were accepted.
    ///
    /// - reject: non-strict keeps the first values that fit; strict fails
    ///   and writes nothing
    /// - overwrite: evicts the oldest elements; if `values` is longer than
    ///   the capacity only its last `capacity` values are kept
    /// - grow: resizes to at least `size + values.len()` first
    pub fn bulk_enqueue(&self, values: &[T]) -> Result<usize> {
        self.inner.lock().bulk_enqueue(values)
    }

    /// Removes up to `amount` elements, oldest first.
    pub fn bulk_dequeue(&self, amount: usize) -> Vec<T> {
        self.inner.lock().bulk_dequeue(amount)
    }

    /// Removes up to `out.len()` elements into `out`, oldest first, and
    /// returns the number written.
    pub fn bulk_dequeue_into(&self, out: &mut [T]) -> usize {
        self.inner.lock().bulk_dequeue_into(out)
    }

    /// Moves the contents into new storage of `new_capacity` slots (default
    /// `max(2 * capacity, size + 1)`), oldest element at slot 0.
    ///
    /// Does nothing unless the policy is [`OverflowPolicy::Grow`]. Fails with
    /// [`crate::RingError::InvalidArgument`] if the target is zero or smaller
    /// than the current size.
    pub fn resize(&self, new_capacity: Option<usize>) -> Result<()> {
        self.inner.lock().resize(new_capacity)
    }

    /// Drops up to `n` of the oldest elements and returns how many were
    /// dropped.
    pub fn discard(&self, n: usize) -> usize {
        self.inner.lock().discard(n)
    }

    /// Removes all elements. Capacity is unchanged.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Returns the number of live elements.
    pub fn size(&self) -> usize {
        self.inner.lock().len()
    }

    /// Alias for [`RingBuffer::size`].
    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Returns the number of free slots.
    pub fn free_space(&self) -> usize {
        self.inner.lock().free_space()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.inner.lock().is_full()
    }

    /// Index of the next write slot.
    pub fn head(&self) -> usize {
        self.inner.lock().head()
    }

    /// Index of the next read slot.
    pub fn tail(&self) -> usize {
        self.inner.lock().tail()
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.inner.lock().policy()
    }

    pub fn is_strict(&self) -> bool {
        self.inner.lock().is_strict()
    }

    /// Returns a copy of the live elements, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.lock().to_vec()
    }

    /// Takes a consistent copy of the contents and pointers.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.inner.lock().snapshot()
    }

    /// Calls `f` on each live element, oldest first, while holding the lock.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(T),
    {
        self.inner.lock().iter().for_each(f);
    }
}

impl<T: Sample> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("RingBuffer")
            .field("capacity", &state.capacity())
            .field("size", &state.len())
            .field("head", &state.head())
            .field("tail", &state.tail())
            .field("policy", &state.policy())
            .field("strict", &state.is_strict())
            .field("pow2", &state.is_power_of_two())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RingError;
    use std::thread;

    #[test]
    fn test_basic_enqueue_dequeue() {
        let buf = RingBuffer::<i32>::new(4).unwrap();
        buf.enqueue(1).unwrap();
        buf.enqueue(2).unwrap();
        buf.enqueue(3).unwrap();

        assert_eq!(buf.peek().unwrap(), 1);
        assert_eq!(buf.dequeue().unwrap(), 1);
        assert_eq!(buf.dequeue().unwrap(), 2);
        assert_eq!(buf.dequeue().unwrap(), 3);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_zero_capacity() {
        let err = RingBuffer::<i32>::new(0).unwrap_err();
        assert!(matches!(err, RingError::Configuration(_)));
    }

    #[test]
    fn test_from_items() {
        let buf = RingBuffer::from_items(&[1.5f32, 2.5, 3.5]).unwrap();
        assert_eq!(buf.capacity(), 3);
        assert!(buf.is_full());
        assert_eq!(buf.policy(), OverflowPolicy::Reject);
        assert!(!buf.is_strict());
        assert_eq!(buf.to_vec(), vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_capacity_and_size() {
        let buf = RingBuffer::<u8>::new(4).unwrap();
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.size(), 0);
        assert_eq!(buf.free_space(), 4);

        buf.bulk_enqueue(&[1, 2, 3]).unwrap();
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.free_space(), 1);
        assert!(!buf.is_full());
    }

    #[test]
    fn test_clone_shares_state() {
        let buf = RingBuffer::<i32>::new(4).unwrap();
        let other = buf.clone();
        other.enqueue(7).unwrap();
        assert_eq!(buf.dequeue().unwrap(), 7);
    }

    #[test]
    fn test_head_tail_introspection() {
        let buf = RingBuffer::<i32>::new(4).unwrap();
        buf.bulk_enqueue(&[1, 2, 3]).unwrap();
        buf.dequeue().unwrap();
        assert_eq!(buf.head(), 3);
        assert_eq!(buf.tail(), 1);

        let snap = buf.snapshot();
        assert_eq!(snap.head(), 3);
        assert_eq!(snap.tail(), 1);
        assert_eq!(snap.as_slice(), &[2, 3]);
    }

    #[test]
    fn test_for_each() {
        let config = RingConfig::new(3).policy(OverflowPolicy::Overwrite);
        let buf = RingBuffer::<i64>::with_config(config).unwrap();
        buf.bulk_enqueue(&[1, 2, 3, 4]).unwrap();

        let mut seen = Vec::new();
        buf.for_each(|v| seen.push(v));
        assert_eq!(seen, vec![2, 3, 4]);
    }

    #[test]
    fn test_debug_output() {
        let buf = RingBuffer::<i32>::new(8).unwrap();
        let out = format!("{:?}", buf);
        assert!(out.contains("capacity: 8"));
        assert!(out.contains("pow2: true"));
    }

    #[test]
    fn test_producer_consumer_threads() {
        let config = RingConfig::new(16).policy(OverflowPolicy::Grow);
        let buf = RingBuffer::<u32>::with_config(config).unwrap();
        let producer_buf = buf.clone();

        let producer = thread::spawn(move || {
            for chunk in (0..1000u32).collect::<Vec<_>>().chunks(10) {
                producer_buf.bulk_enqueue(chunk).unwrap();
            }
        });
        producer.join().unwrap();

        let mut collected = Vec::new();
        while !buf.is_empty() {
            collected.extend(buf.bulk_dequeue(64));
        }
        assert_eq!(collected, (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        let config = RingConfig::new(32).policy(OverflowPolicy::Overwrite);
        let buf = RingBuffer::<i32>::with_config(config).unwrap();

        let writer = {
            let buf = buf.clone();
            thread::spawn(move || {
                for i in 0..500 {
                    buf.enqueue(i).unwrap();
                }
            })
        };
        let reader = {
            let buf = buf.clone();
            thread::spawn(move || {
                let mut last = -1;
                for _ in 0..500 {
                    for v in buf.bulk_dequeue(4) {
                        // FIFO order survives interleaving
                        assert!(v > last);
                        last = v;
                    }
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
        assert!(buf.size() <= buf.capacity());
    }
}

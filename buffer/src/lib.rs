//! Fixed-capacity ring buffer for streaming numeric samples.
//!
//! This crate provides [`RingBuffer<T>`], a circular buffer over fixed-width
//! samples (`i16` PCM, `f32`, bytes, ...) for moving data between a producer
//! and a consumer running at different rates, e.g. a capture thread writing
//! audio and an encoder reading fixed-size frames.
//!
//! # Overflow Policies
//!
//! What happens when a write meets a full buffer is chosen at construction
//! with [`OverflowPolicy`]:
//!
//! - `Reject`: the write is refused
//! - `Overwrite`: the oldest elements are evicted
//! - `Grow`: storage is reallocated, preserving order
//!
//! ```
//! use circq_buffer::{OverflowPolicy, RingBuffer, RingConfig};
//!
//! let config = RingConfig::new(5).policy(OverflowPolicy::Overwrite);
//! let buf = RingBuffer::<i32>::with_config(config).unwrap();
//! buf.bulk_enqueue(&[1, 2, 3, 4, 5, 6]).unwrap();  // Drops 1
//! assert_eq!(buf.bulk_dequeue(5), vec![2, 3, 4, 5, 6]);
//! ```
//!
//! # Strict Mode
//!
//! Strict buffers report invalid operations as [`RingError`]s. Non-strict
//! buffers absorb them: writes past a full rejecting buffer are dropped and
//! reads from an empty buffer return `T::default()`.
//!
//! ```
//! use circq_buffer::{RingBuffer, RingConfig, RingError};
//!
//! let strict = RingBuffer::<i16>::with_config(RingConfig::new(2).strict(true)).unwrap();
//! assert_eq!(strict.dequeue(), Err(RingError::Empty));
//!
//! let lenient = RingBuffer::<i16>::new(2).unwrap();
//! assert_eq!(lenient.dequeue(), Ok(0));
//! ```
//!
//! # Thread Safety
//!
//! [`RingBuffer<T>`] is `Send + Sync` and every method holds the buffer's
//! lock for its full duration. Clones share the same buffer via `Arc`.
//!
//! # Debugging
//!
//! [`RingBuffer::snapshot`] copies the contents and pointers under the lock;
//! the [`render`] module draws snapshots as a slot array or an ASCII circle.

mod config;
mod error;
mod index;
mod presets;
mod ring_buffer;
mod sample;
mod snapshot;
mod state;

pub mod render;

pub use config::{OverflowPolicy, RingConfig};
pub use error::{Result, RingError};
pub use presets::*;
pub use ring_buffer::RingBuffer;
pub use sample::Sample;
pub use snapshot::Snapshot;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RingBuffer<i16>>();
        assert_send_sync::<RingBuffer<f64>>();
        assert_send_sync::<Snapshot<u8>>();
    }

    #[test]
    fn test_buffer_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<RingBuffer<i32>>();
        assert_clone::<Snapshot<i32>>();
    }
}

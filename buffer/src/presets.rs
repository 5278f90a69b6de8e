//! Convenience constructors for common sample formats.
//!
//! Streaming audio is the usual producer here: a capture thread writes
//! fixed-size frames and a consumer drains them at its own pace.

use crate::config::{OverflowPolicy, RingConfig};
use crate::error::Result;
use crate::ring_buffer::RingBuffer;

/// Samples in a 20ms frame of 16kHz mono audio.
pub const FRAME_20MS_16K: usize = 320;

/// Samples in a 20ms frame of 48kHz mono audio.
pub const FRAME_20MS_48K: usize = 960;

// ============================================================================
// Rejecting rings
// ============================================================================

/// Creates a non-strict 16-bit PCM ring that drops writes when full.
pub fn pcm16_ring(capacity: usize) -> Result<RingBuffer<i16>> {
    RingBuffer::new(capacity)
}

/// Creates a non-strict `f32` ring that drops writes when full.
pub fn f32_ring(capacity: usize) -> Result<RingBuffer<f32>> {
    RingBuffer::new(capacity)
}

/// Creates a non-strict byte ring that drops writes when full.
pub fn byte_ring(capacity: usize) -> Result<RingBuffer<u8>> {
    RingBuffer::new(capacity)
}

// ============================================================================
// Sliding windows
// ============================================================================

/// Creates a 16-bit PCM ring holding the most recent `frames` frames of
/// `frame_len` samples, overwriting older audio.
pub fn pcm16_window(frame_len: usize, frames: usize) -> Result<RingBuffer<i16>> {
    let capacity = frame_len.saturating_mul(frames);
    let config = RingConfig::new(capacity).policy(OverflowPolicy::Overwrite);
    RingBuffer::with_config(config)
}

/// Creates an `f32` ring holding the most recent `frames` frames of
/// `frame_len` samples, overwriting older audio.
pub fn f32_window(frame_len: usize, frames: usize) -> Result<RingBuffer<f32>> {
    let capacity = frame_len.saturating_mul(frames);
    let config = RingConfig::new(capacity).policy(OverflowPolicy::Overwrite);
    RingBuffer::with_config(config)
}

// ============================================================================
// Growable queues
// ============================================================================

/// Creates a 16-bit PCM ring that grows instead of dropping samples.
pub fn pcm16_queue(initial_capacity: usize) -> Result<RingBuffer<i16>> {
    let config = RingConfig::new(initial_capacity);
    RingBuffer::with_config(config.policy(OverflowPolicy::Grow))
}

//! Error types for ring buffer operations.

use thiserror::Error;

/// Ring buffer operation error.
///
/// Every variant is a local, synchronous failure of the call that returned
/// it. Nothing is retried internally and the buffer is left unchanged.
/// Non-strict buffers only ever return [`RingError::Configuration`] and
/// [`RingError::InvalidArgument`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    /// Invalid construction parameters.
    #[error("ring: configuration error: {0}")]
    Configuration(String),

    /// `peek` or `dequeue` on an empty strict buffer.
    #[error("ring: buffer is empty")]
    Empty,

    /// Write into a full strict buffer with the reject policy.
    #[error("ring: capacity {capacity} exceeded ({requested} requested, {available} free)")]
    CapacityExceeded {
        capacity: usize,
        requested: usize,
        available: usize,
    },

    /// Bad `resize` target.
    #[error("ring: invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RingError>;

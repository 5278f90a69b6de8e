//! Construction options for ring buffers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RingError;

/// What a write does when the buffer is full.
///
/// The policy is chosen at construction and never changes for the lifetime
/// of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Refuse the write. Strict buffers return
    /// [`RingError::CapacityExceeded`]; others drop the value.
    #[default]
    Reject,
    /// Evict the oldest elements to make room.
    Overwrite,
    /// Reallocate larger storage, preserving logical order.
    Grow,
}

impl OverflowPolicy {
    /// Returns the lowercase name of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            OverflowPolicy::Reject => "reject",
            OverflowPolicy::Overwrite => "overwrite",
            OverflowPolicy::Grow => "grow",
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverflowPolicy {
    type Err = RingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(OverflowPolicy::Reject),
            "overwrite" | "overwriting" => Ok(OverflowPolicy::Overwrite),
            "grow" | "resize" => Ok(OverflowPolicy::Grow),
            other => Err(RingError::Configuration(format!(
                "unknown overflow policy {:?} (expected reject, overwrite or grow)",
                other
            ))),
        }
    }
}

/// Ring buffer configuration.
///
/// `capacity` may be left unset when the buffer is built from an initial
/// item sequence, in which case the sequence length is used.
///
/// ```
/// use circq_buffer::{OverflowPolicy, RingConfig};
///
/// let config = RingConfig::new(1024)
///     .policy(OverflowPolicy::Overwrite)
///     .strict(true);
/// assert_eq!(config.capacity, Some(1024));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Number of slots. Required unless derived from initial items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
    /// Overflow policy.
    pub policy: OverflowPolicy,
    /// Return errors on invalid operations instead of clamping.
    pub strict: bool,
}

impl RingConfig {
    /// Creates a configuration with the given capacity, the reject policy
    /// and non-strict validation.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Sets the capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets the overflow policy.
    pub fn policy(mut self, policy: OverflowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets strict validation.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

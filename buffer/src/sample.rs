//! Fixed-width numeric element types.

use std::fmt::{Debug, Display};

/// A fixed-width numeric sample that can be stored in a ring buffer.
///
/// Samples are plain `Copy` values, so bulk transfers are straight slice
/// copies. `Default` supplies the fill value for unused slots and the value
/// returned by non-strict reads of an empty buffer.
pub trait Sample: Copy + Default + PartialEq + Debug + Display + Send + Sync + 'static {
    /// Width of one sample in bytes.
    const WIDTH: usize = std::mem::size_of::<Self>();
}

macro_rules! impl_sample {
    ($($t:ty),* $(,)?) => {
        $(impl Sample for $t {})*
    };
}

impl_sample!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

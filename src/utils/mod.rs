//! Shared utilities.

mod rounding;

pub use rounding::{percentage, round1, to_fixed};

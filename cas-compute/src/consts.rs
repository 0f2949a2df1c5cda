//! Numerical constants used by the engine, as [`Float`]s at [`PRECISION`] bits.
//!
//! [`PRECISION`]: crate::primitive::PRECISION

use once_cell::sync::Lazy;
use rug::{ops::Pow, Float};
use super::primitive::float;

/// The circle constant.
pub static PI: Lazy<Float> = Lazy::new(|| float(-1).acos());

/// Values whose magnitude exceeds this bound are treated as diverging when a limit is estimated
/// numerically.
pub static DIVERGENCE_BOUND: Lazy<Float> = Lazy::new(|| float(10).pow(8));

/// Two numerical estimates closer than this bound are treated as the same value.
pub static CONVERGENCE_TOLERANCE: Lazy<Float> = Lazy::new(|| float(10).pow(-9));

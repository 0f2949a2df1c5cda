//! Configuration of the walkthrough builders.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numeric approximations are rounded to this many fractional digits.
pub const APPROXIMATION_DIGITS: usize = 6;

/// Options that change how much detail the walkthroughs contain.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StepConfig {
    /// The largest accepted derivative or series order. Orders outside `1..=max_order` are
    /// rejected.
    pub max_order: usize,

    /// The number of derivatives shown in a Taylor series walkthrough. [`None`] shows all
    /// `order + 1` of them.
    pub series_narrative_terms: Option<usize>,

    /// The terms of a summation are listed one by one if there are at most this many.
    pub expansion_threshold: usize,

    /// Points at which the product rule combination is compared with the derivative computed by
    /// the engine.
    pub cross_check_points: Vec<f64>,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            max_order: 10,
            series_narrative_terms: Some(5),
            expansion_threshold: 15,
            cross_check_points: vec![0.37, 1.21, 2.53],
        }
    }
}

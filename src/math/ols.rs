//! Closed-form ordinary least squares for a straight line.
//!
//! ```text
//! a = (n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)
//! b = (Σy − a·Σx) / n
//! ```
//!
//! The linearized exponential and logarithmic fits reuse this solver on
//! transformed samples.
//!
//! A zero denominator (every x identical) is deliberately not trapped: the
//! resulting infinities / NaNs flow downstream and are filtered by the scorer
//! and the curve sampler.

use crate::domain::{Params, Sample};

/// Fit `y = a·x + b` and return `(a, b)` as `Params`.
///
/// An empty slice yields NaN parameters (0/0).
pub fn fit_line(samples: &[Sample]) -> Params {
    let n = samples.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for s in samples {
        sum_x += s.x;
        sum_y += s.y;
        sum_xy += s.x * s.y;
        sum_x2 += s.x * s.x;
    }

    let a = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    let b = (sum_y - a * sum_x) / n;
    Params { a, b }
}

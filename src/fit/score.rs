//! Goodness of fit (coefficient of determination).
//!
//! `R² = 1 − SS_res / SS_tot`, where the mean is taken over all samples but
//! samples with a non-finite prediction are left out of both sums. The score is
//! not clamped: a fit worse than the mean predictor is negative.

use crate::domain::{Family, Params, Sample};
use crate::models::predict;

/// Compute R² for `params` of `family` on `samples`.
///
/// Returns `0.0` when fewer than two samples are given or when the retained
/// samples have no variance.
pub fn r_squared(samples: &[Sample], family: Family, params: &Params) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }

    let y_mean = samples.iter().map(|s| s.y).sum::<f64>() / samples.len() as f64;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for s in samples {
        let y_pred = predict(family, s.x, params);
        if !y_pred.is_finite() {
            continue;
        }
        ss_res += (s.y - y_pred).powi(2);
        ss_tot += (s.y - y_mean).powi(2);
    }

    if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_fit_scores_one() {
        let data = [Sample::new(0.0, 1.0), Sample::new(1.0, 3.0), Sample::new(2.0, 5.0)];
        let r2 = r_squared(&data, Family::Linear, &Params::new(2.0, 1.0));
        assert!((r2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn worse_than_mean_is_negative() {
        let data = [Sample::new(0.0, 0.0), Sample::new(1.0, 1.0), Sample::new(2.0, 2.0)];
        let r2 = r_squared(&data, Family::Linear, &Params::new(-1.0, 10.0));
        assert!(r2 < 0.0);
    }

    #[test]
    fn non_finite_predictions_are_excluded_from_both_sums() {
        // ln(0) = -inf: the first sample is skipped entirely.
        // Mean still uses all three samples: (100 + 0 + ln 2) / 3.
        let data = [
            Sample::new(0.0, 100.0),
            Sample::new(1.0, 0.0),
            Sample::new(2.0, 2f64.ln()),
        ];
        let r2 = r_squared(&data, Family::Logarithmic, &Params::new(1.0, 0.0));
        assert!((r2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_y_scores_zero() {
        let data = [Sample::new(0.0, 4.0), Sample::new(1.0, 4.0)];
        assert_eq!(r_squared(&data, Family::Linear, &Params::new(0.0, 4.0)), 0.0);
    }

    #[test]
    fn single_sample_scores_zero() {
        let data = [Sample::new(0.0, 4.0)];
        assert_eq!(r_squared(&data, Family::Linear, &Params::new(0.0, 0.0)), 0.0);
    }
}

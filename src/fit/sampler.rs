//! Dense curve sampling for plotting and exports.
//!
//! The curve spans the x-range of the *input* samples, with `n_steps + 1`
//! evenly spaced positions:
//!
//! ```text
//! x_i = x_min + i · (x_max − x_min) / n_steps,   i = 0..=n_steps
//! ```
//!
//! Positions whose prediction is non-finite are dropped, so the output may be
//! shorter than `n_steps + 1` (or empty).

use crate::domain::{FitResult, FitType, Sample};
use crate::fit::selection::fit_and_select;
use crate::models::predict;

/// Default number of sampling steps (the curve has one more point than this).
pub const DEFAULT_CURVE_STEPS: usize = 100;

/// Fit `samples` with `fit_type` and sample the resulting curve.
///
/// `Auto` is resolved once and its parameters are reused for every position.
/// Returns an empty vector for fewer than two samples.
pub fn sample_curve(samples: &[Sample], fit_type: FitType, n_steps: usize) -> Vec<Sample> {
    if samples.len() < 2 {
        return Vec::new();
    }
    let fit = fit_and_select(samples, fit_type).best;
    sample_fit(samples, &fit, n_steps)
}

/// Sample an already-resolved fit over the x-range of `samples`.
pub fn sample_fit(samples: &[Sample], fit: &FitResult, n_steps: usize) -> Vec<Sample> {
    if samples.len() < 2 || n_steps == 0 {
        return Vec::new();
    }

    let x_min = samples.iter().map(|s| s.x).fold(f64::INFINITY, f64::min);
    let x_max = samples.iter().map(|s| s.x).fold(f64::NEG_INFINITY, f64::max);
    let step = (x_max - x_min) / n_steps as f64;

    (0..=n_steps)
        .filter_map(|i| {
            let x = x_min + i as f64 * step;
            let y = predict(fit.family, x, &fit.params);
            y.is_finite().then_some(Sample { x, y })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Family;

    #[test]
    fn curve_has_steps_plus_one_points_spanning_the_input() {
        let data = vec![
            Sample::new(3.0, 1.0),
            Sample::new(-1.0, 2.0),
            Sample::new(7.0, 0.5),
        ];
        let curve = sample_curve(&data, FitType::Concrete(Family::Linear), 100);
        assert_eq!(curve.len(), 101);
        assert_eq!(curve[0].x, -1.0);
        assert!((curve[100].x - 7.0).abs() < 1e-12);
        for w in curve.windows(2) {
            assert!(w[1].x >= w[0].x);
        }
    }

    #[test]
    fn too_few_samples_give_an_empty_curve() {
        let data = vec![Sample::new(1.0, 1.0)];
        assert!(sample_curve(&data, FitType::Auto, 100).is_empty());
        assert!(sample_curve(&[], FitType::Auto, 100).is_empty());
    }

    #[test]
    fn identical_x_linear_curve_is_empty() {
        let data = vec![Sample::new(5.0, 1.0), Sample::new(5.0, 2.0)];
        assert!(sample_curve(&data, FitType::Concrete(Family::Linear), 100).is_empty());
    }

    #[test]
    fn logarithmic_curve_drops_non_positive_x() {
        // x in [-1, 3] with 4 steps: x = -1, 0, 1, 2, 3; only 1, 2, 3 are finite.
        let data = vec![
            Sample::new(-1.0, 0.0),
            Sample::new(1.0, 0.0),
            Sample::new(3.0, 3f64.ln()),
        ];
        let curve = sample_curve(&data, FitType::Concrete(Family::Logarithmic), 4);
        let xs: Vec<f64> = curve.iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn auto_uses_the_selected_family() {
        let data: Vec<Sample> = (0..6)
            .map(|i| Sample::new(i as f64, 2.0 * i as f64 + 1.0))
            .collect();
        let auto = sample_curve(&data, FitType::Auto, 10);
        let linear = sample_curve(&data, FitType::Concrete(Family::Linear), 10);
        assert_eq!(auto, linear);
    }
}

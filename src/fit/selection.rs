//! Model selection across the four concrete families.
//!
//! Every family is estimated with its own best-fit parameters and scored by R².
//!
//! Selection rules:
//! 1. Candidates are visited in `Family::ALL` order.
//! 2. The first candidate is the default winner.
//! 3. A later candidate replaces the winner only on a strictly greater R², so
//!    ties (and NaN scores) resolve to the earlier family.

use tracing::debug;

use crate::domain::{Family, FitResult, FitType, Sample};
use crate::fit::estimator::estimate;
use crate::fit::score::r_squared;

/// Output of fitting + selection.
#[derive(Debug, Clone)]
pub struct FitSelection {
    pub best: FitResult,
    /// Every evaluated family (a single entry when the fit type was concrete).
    pub fits: Vec<FitResult>,
}

/// Estimate and score one concrete family.
pub fn fit_family(samples: &[Sample], family: Family) -> FitResult {
    let params = estimate(samples, family);
    let r_squared = r_squared(samples, family, &params);
    FitResult {
        family,
        params,
        r_squared,
    }
}

/// Fit every concrete family, in enumeration order.
pub fn evaluate_all(samples: &[Sample]) -> Vec<FitResult> {
    Family::ALL
        .iter()
        .map(|&family| fit_family(samples, family))
        .collect()
}

/// Return the best-scoring concrete family for `samples`.
///
/// Callers must pass at least two samples.
pub fn select_best(samples: &[Sample]) -> Family {
    select_by_r_squared(&evaluate_all(samples)).family
}

/// Resolve `fit_type` and fit it.
///
/// `Auto` evaluates all four families and keeps the best one; a concrete fit
/// type is fitted directly.
pub fn fit_and_select(samples: &[Sample], fit_type: FitType) -> FitSelection {
    match fit_type {
        FitType::Concrete(family) => {
            let fit = fit_family(samples, family);
            FitSelection {
                best: fit,
                fits: vec![fit],
            }
        }
        FitType::Auto => {
            let fits = evaluate_all(samples);
            let best = select_by_r_squared(&fits);
            debug!(
                family = best.family.key(),
                r_squared = best.r_squared,
                "auto-selected family"
            );
            FitSelection { best, fits }
        }
    }
}

/// The first candidate seeds the winner with its own score, even when that
/// score is NaN; a NaN seed is then never replaced since no comparison with
/// NaN is `true`.
fn select_by_r_squared(fits: &[FitResult]) -> FitResult {
    let mut best = fits[0];
    for f in &fits[1..] {
        if f.r_squared > best.r_squared {
            best = *f;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Params;
    use crate::models::predict;

    fn result(family: Family, r_squared: f64) -> FitResult {
        FitResult {
            family,
            params: Params::default(),
            r_squared,
        }
    }

    #[test]
    fn ties_resolve_to_the_earlier_family() {
        let fits = vec![
            result(Family::Linear, 0.8),
            result(Family::Exponential, 0.95),
            result(Family::Logarithmic, 0.95),
            result(Family::Saturation, 0.95),
        ];
        assert_eq!(select_by_r_squared(&fits).family, Family::Exponential);
    }

    #[test]
    fn nan_scores_never_win() {
        let fits = vec![
            result(Family::Linear, -3.0),
            result(Family::Exponential, f64::NAN),
            result(Family::Logarithmic, f64::NAN),
            result(Family::Saturation, -4.0),
        ];
        assert_eq!(select_by_r_squared(&fits).family, Family::Linear);
    }

    #[test]
    fn nan_first_candidate_keeps_the_win() {
        let fits = vec![
            result(Family::Linear, f64::NAN),
            result(Family::Exponential, 0.5),
            result(Family::Logarithmic, 0.9),
            result(Family::Saturation, 0.99),
        ];
        assert_eq!(select_by_r_squared(&fits).family, Family::Linear);
    }

    #[test]
    fn linear_data_selects_linear() {
        let data: Vec<Sample> = (0..10)
            .map(|i| Sample::new(i as f64, 3.0 * i as f64 - 2.0))
            .collect();
        assert_eq!(select_best(&data), Family::Linear);
    }

    #[test]
    fn exponential_data_selects_exponential() {
        let truth = Params::new(2.0, 0.5);
        let data: Vec<Sample> = (0..=5)
            .map(|i| Sample::new(i as f64, predict(Family::Exponential, i as f64, &truth)))
            .collect();
        assert_eq!(select_best(&data), Family::Exponential);
    }

    #[test]
    fn identical_x_falls_back_to_first_family() {
        // Every family either scores NaN or 0 on a vertical stack of points.
        let data = vec![Sample::new(5.0, 1.0), Sample::new(5.0, 2.0)];
        let selection = fit_and_select(&data, FitType::Auto);
        assert_eq!(selection.fits.len(), 4);
        assert_eq!(selection.best.family, Family::Linear);
    }

    #[test]
    fn concrete_fit_type_skips_selection() {
        let data: Vec<Sample> = (0..10)
            .map(|i| Sample::new(i as f64, i as f64))
            .collect();
        let selection = fit_and_select(&data, FitType::Concrete(Family::Saturation));
        assert_eq!(selection.fits.len(), 1);
        assert_eq!(selection.best.family, Family::Saturation);
    }

    #[test]
    fn auto_selection_reports_all_candidates_in_order() {
        let data: Vec<Sample> = (1..8)
            .map(|i| Sample::new(i as f64, (i as f64).ln()))
            .collect();
        let selection = fit_and_select(&data, FitType::Auto);
        let order: Vec<Family> = selection.fits.iter().map(|f| f.family).collect();
        assert_eq!(order, Family::ALL.to_vec());
        assert_eq!(selection.best.family, Family::Logarithmic);
    }
}

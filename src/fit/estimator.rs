//! Parameter estimation for a single concrete family.
//!
//! Given samples `(x_i, y_i)` and a family, return the best-fit `(a, b)`:
//!
//! - linear: closed-form OLS
//! - exponential: OLS on `(x, ln y)` for `y > 0`, then `a = e^intercept`, `b = slope`
//! - logarithmic: OLS on `(ln x, y)` for `x > 0`, then `a = slope`, `b = intercept`
//! - saturation: fixed-iteration damped update of `b` with `a` held at `1.1·max(y)`
//!
//! Inputs that do not meet a family's preconditions produce `Params::default()`
//! (`a = 1`, `b = 0`) instead of an error. The host always has something to draw.

use tracing::{debug, trace};

use crate::domain::{Family, Params, Sample};
use crate::math::fit_line;

/// Minimum number of usable samples for any family.
pub const MIN_SAMPLES: usize = 2;

/// Saturation: number of update passes. There is no convergence check.
pub const SATURATION_ITERATIONS: usize = 100;
/// Saturation: fixed step size applied to each `b` update.
pub const SATURATION_DAMPING: f64 = 0.1;
/// Saturation: `a` is initialized as this multiple of `max(y)` and never updated.
pub const SATURATION_A_SCALE: f64 = 1.1;
/// Saturation: starting rate.
pub const SATURATION_B_INIT: f64 = 0.1;

/// Estimate parameters for `family` from `samples`.
pub fn estimate(samples: &[Sample], family: Family) -> Params {
    if samples.len() < MIN_SAMPLES {
        debug!(
            family = family.key(),
            n = samples.len(),
            "too few samples, using default parameters"
        );
        return Params::default();
    }

    match family {
        Family::Linear => fit_line(samples),
        Family::Exponential => estimate_exponential(samples),
        Family::Logarithmic => estimate_logarithmic(samples),
        Family::Saturation => estimate_saturation(samples),
    }
}

fn estimate_exponential(samples: &[Sample]) -> Params {
    let log_samples: Vec<Sample> = samples
        .iter()
        .filter(|s| s.y > 0.0)
        .map(|s| Sample::new(s.x, s.y.ln()))
        .collect();

    if log_samples.len() < MIN_SAMPLES {
        debug!(
            usable = log_samples.len(),
            "exponential fit needs at least two samples with y > 0"
        );
        return Params::default();
    }

    // ln(y) = ln(a) + b·x
    let line = fit_line(&log_samples);
    Params {
        a: line.b.exp(),
        b: line.a,
    }
}

fn estimate_logarithmic(samples: &[Sample]) -> Params {
    let log_samples: Vec<Sample> = samples
        .iter()
        .filter(|s| s.x > 0.0)
        .map(|s| Sample::new(s.x.ln(), s.y))
        .collect();

    if log_samples.len() < MIN_SAMPLES {
        debug!(
            usable = log_samples.len(),
            "logarithmic fit needs at least two samples with x > 0"
        );
        return Params::default();
    }

    // y = a·ln(x) + b: slope and intercept keep their roles.
    fit_line(&log_samples)
}

fn estimate_saturation(samples: &[Sample]) -> Params {
    let max_y = samples.iter().map(|s| s.y).fold(f64::NEG_INFINITY, f64::max);
    let a = max_y * SATURATION_A_SCALE;
    let mut b = SATURATION_B_INIT;

    for iter in 0..SATURATION_ITERATIONS {
        let mut num = 0.0;
        let mut den = 0.0;
        for s in samples {
            let exp = (-b * s.x).exp();
            let pred = a * (1.0 - exp);
            num += s.x * (s.y - pred) * exp;
            den += s.x * s.x * exp * exp;
        }
        if den != 0.0 {
            b += num / den * SATURATION_DAMPING;
        }
        trace!(iter, b, "saturation update");
    }

    Params { a, b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::score::r_squared;
    use crate::models::predict;

    fn samples(pairs: &[(f64, f64)]) -> Vec<Sample> {
        pairs.iter().copied().map(Sample::from).collect()
    }

    #[test]
    fn linear_on_collinear_points() {
        let data = samples(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let p = estimate(&data, Family::Linear);
        assert!((p.a - 1.0).abs() < 1e-12);
        assert!(p.b.abs() < 1e-12);
        assert!((r_squared(&data, Family::Linear, &p) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn linear_with_identical_x_propagates_non_finite() {
        let data = samples(&[(5.0, 1.0), (5.0, 2.0)]);
        let p = estimate(&data, Family::Linear);
        assert!(!p.a.is_finite());
        assert!(!p.b.is_finite());
    }

    #[test]
    fn exponential_recovers_generator() {
        let data: Vec<Sample> = (0..=5)
            .map(|i| {
                let x = i as f64;
                Sample::new(x, 2.0 * (0.5 * x).exp())
            })
            .collect();
        let p = estimate(&data, Family::Exponential);
        assert!((p.a - 2.0).abs() < 1e-6, "a = {}", p.a);
        assert!((p.b - 0.5).abs() < 1e-6, "b = {}", p.b);
        assert!((r_squared(&data, Family::Exponential, &p) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn exponential_ignores_non_positive_y() {
        let data = samples(&[(0.0, -3.0), (1.0, 0.0), (2.0, 4.0), (3.0, 8.0)]);
        let p = estimate(&data, Family::Exponential);
        // Only (2, 4) and (3, 8) survive: b = ln 2, a = 4 / e^(2 ln 2) = 1.
        assert!((p.b - 2f64.ln()).abs() < 1e-12);
        assert!((p.a - 1.0).abs() < 1e-12);
    }

    #[test]
    fn exponential_with_one_positive_y_uses_default() {
        let data = samples(&[(0.0, -1.0), (1.0, 0.0), (2.0, 5.0)]);
        assert_eq!(estimate(&data, Family::Exponential), Params::default());
    }

    #[test]
    fn logarithmic_keeps_slope_and_intercept_roles() {
        let data: Vec<Sample> = [1.0, 2.0, 4.0, 8.0]
            .iter()
            .map(|&x: &f64| Sample::new(x, 3.0 * x.ln() + 1.5))
            .collect();
        let p = estimate(&data, Family::Logarithmic);
        assert!((p.a - 3.0).abs() < 1e-10);
        assert!((p.b - 1.5).abs() < 1e-10);
    }

    #[test]
    fn logarithmic_without_positive_x_uses_default() {
        let data = samples(&[(-2.0, 1.0), (0.0, 2.0), (3.0, 4.0)]);
        assert_eq!(estimate(&data, Family::Logarithmic), Params::default());
    }

    #[test]
    fn fewer_than_two_samples_use_default_for_every_family() {
        let one = samples(&[(1.0, 1.0)]);
        for family in Family::ALL {
            assert_eq!(estimate(&one, family), Params::default());
            assert_eq!(estimate(&[], family), Params::default());
        }
    }

    #[test]
    fn saturation_keeps_initial_a() {
        let data = samples(&[(1.0, 2.0), (2.0, 3.0), (4.0, 5.0)]);
        let p = estimate(&data, Family::Saturation);
        assert_eq!(p.a, 5.0 * SATURATION_A_SCALE);
        assert!(p.b.is_finite());
    }

    #[test]
    fn saturation_fixture_scores_well() {
        let truth = Params::new(10.0, 0.3);
        let data: Vec<Sample> = (0..=20)
            .map(|i| {
                let x = i as f64 * 0.5;
                Sample::new(x, predict(Family::Saturation, x, &truth))
            })
            .collect();
        let p = estimate(&data, Family::Saturation);
        let r2 = r_squared(&data, Family::Saturation, &p);
        assert!(r2 > 0.9, "r2 = {r2}, params = {p:?}");
        assert!(p.b > 0.1 && p.b < 0.6, "b = {}", p.b);
    }

    #[test]
    fn saturation_with_all_zero_x_never_moves_b() {
        let data = samples(&[(0.0, 1.0), (0.0, 2.0)]);
        let p = estimate(&data, Family::Saturation);
        assert_eq!(p.b, SATURATION_B_INIT);
    }

    #[test]
    fn estimate_is_bit_identical_across_calls() {
        let data = samples(&[(0.5, 1.2), (1.0, 2.9), (2.5, 4.1), (4.0, 4.8), (6.0, 5.1)]);
        for family in Family::ALL {
            let p1 = estimate(&data, family);
            let p2 = estimate(&data, family);
            assert_eq!(p1.a.to_bits(), p2.a.to_bits());
            assert_eq!(p1.b.to_bits(), p2.b.to_bits());
        }
    }
}

//! Model evaluation for the four curve families.
//!
//! `predict` is the single primitive the rest of the engine builds on: R² scoring,
//! curve sampling, plotting and exports all go through it.
//!
//! No domain guards are applied here. `ln(x)` for `x <= 0` yields NaN / -inf and
//! `exp` may overflow to +inf; callers filter non-finite values.

use crate::domain::{Family, Params};

/// Predict `y(x)` for the given family and parameters.
pub fn predict(family: Family, x: f64, params: &Params) -> f64 {
    let Params { a, b } = *params;
    match family {
        Family::Linear => a * x + b,
        Family::Exponential => a * (b * x).exp(),
        Family::Logarithmic => a * x.ln() + b,
        Family::Saturation => a * (1.0 - (-b * x).exp()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_matches_formulas() {
        let p = Params::new(2.0, 0.5);
        assert_eq!(predict(Family::Linear, 3.0, &p), 6.5);
        assert!((predict(Family::Exponential, 2.0, &p) - 2.0 * 1f64.exp()).abs() < 1e-12);
        assert!((predict(Family::Logarithmic, 1.0, &p) - 0.5).abs() < 1e-12);
        assert!((predict(Family::Saturation, 0.0, &p)).abs() < 1e-12);
    }

    #[test]
    fn logarithmic_outside_domain_is_not_finite() {
        let p = Params::new(1.0, 0.0);
        assert!(predict(Family::Logarithmic, -1.0, &p).is_nan());
        assert_eq!(predict(Family::Logarithmic, 0.0, &p), f64::NEG_INFINITY);
    }
}

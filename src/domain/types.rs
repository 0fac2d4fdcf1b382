//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - saved as part of a workspace file
//! - embedded into standalone exports

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One `(x, y)` observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Concrete curve family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// `y = a·x + b`
    Linear,
    /// `y = a·e^(b·x)`
    Exponential,
    /// `y = a·ln(x) + b`
    Logarithmic,
    /// `y = a·(1 − e^(−b·x))`
    Saturation,
}

impl Family {
    /// Fixed enumeration order. Model selection breaks ties in this order.
    pub const ALL: [Family; 4] = [
        Family::Linear,
        Family::Exponential,
        Family::Logarithmic,
        Family::Saturation,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Family::Linear => "Linear",
            Family::Exponential => "Exponential",
            Family::Logarithmic => "Logarithmic",
            Family::Saturation => "Saturation",
        }
    }

    /// Lowercase key used in CLI flags and files.
    pub fn key(self) -> &'static str {
        match self {
            Family::Linear => "linear",
            Family::Exponential => "exponential",
            Family::Logarithmic => "logarithmic",
            Family::Saturation => "saturation",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Which family to fit.
///
/// `Auto` means: let the model selector pick the best-scoring concrete family.
/// It is resolved once at the entry of each fit and never evaluated directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FitType {
    #[default]
    Auto,
    Concrete(Family),
}

impl FitType {
    /// Cycle order used by interactive front-ends.
    pub fn next(self) -> Self {
        match self {
            FitType::Auto => FitType::Concrete(Family::Linear),
            FitType::Concrete(Family::Linear) => FitType::Concrete(Family::Exponential),
            FitType::Concrete(Family::Exponential) => FitType::Concrete(Family::Logarithmic),
            FitType::Concrete(Family::Logarithmic) => FitType::Concrete(Family::Saturation),
            FitType::Concrete(Family::Saturation) => FitType::Auto,
        }
    }

    pub fn to_family(self) -> Option<Family> {
        match self {
            FitType::Auto => None,
            FitType::Concrete(family) => Some(family),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            FitType::Auto => "auto",
            FitType::Concrete(family) => family.key(),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FitType::Auto => "Optimal (Auto)",
            FitType::Concrete(family) => family.display_name(),
        }
    }
}

impl From<Family> for FitType {
    fn from(value: Family) -> Self {
        FitType::Concrete(value)
    }
}

impl fmt::Display for FitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "optimal" => Ok(FitType::Auto),
            "linear" => Ok(FitType::Concrete(Family::Linear)),
            "exponential" => Ok(FitType::Concrete(Family::Exponential)),
            "logarithmic" => Ok(FitType::Concrete(Family::Logarithmic)),
            "saturation" => Ok(FitType::Concrete(Family::Saturation)),
            other => Err(format!(
                "unknown fit type '{other}' (expected auto, linear, exponential, logarithmic or saturation)"
            )),
        }
    }
}

impl From<FitType> for String {
    fn from(value: FitType) -> Self {
        value.key().to_string()
    }
}

impl TryFrom<String> for FitType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The two fitted scalars. Their meaning depends on the family they were
/// estimated for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub a: f64,
    pub b: f64,
}

impl Params {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite()
    }
}

/// Returned when the estimator's preconditions are not met.
impl Default for Params {
    fn default() -> Self {
        Self { a: 1.0, b: 0.0 }
    }
}

/// Fit output for a single dataset and family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub family: Family,
    pub params: Params,
    pub r_squared: f64,
}

/// Summary stats about a set of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DatasetStats {
    /// Returns `None` for an empty slice or when any bound is non-finite.
    pub fn from_samples(samples: &[Sample]) -> Option<Self> {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for s in samples {
            x_min = x_min.min(s.x);
            x_max = x_max.max(s.x);
            y_min = y_min.min(s.y);
            y_max = y_max.max(s.y);
        }

        if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
            return None;
        }

        Some(Self {
            n_points: samples.len(),
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }
}

/// A run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Overrides every dataset's own fit type when set.
    pub fit_type: Option<FitType>,
    /// Number of curve sampling steps (the curve has `steps + 1` points).
    pub curve_steps: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_html: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
    pub save_workspace: Option<PathBuf>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            fit_type: None,
            curve_steps: crate::fit::DEFAULT_CURVE_STEPS,
            plot: true,
            plot_width: 100,
            plot_height: 25,
            export_html: None,
            export_curve: None,
            save_workspace: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_type_parses_keys_and_optimal_alias() {
        assert_eq!("auto".parse::<FitType>().unwrap(), FitType::Auto);
        assert_eq!("Optimal".parse::<FitType>().unwrap(), FitType::Auto);
        assert_eq!(
            " saturation ".parse::<FitType>().unwrap(),
            FitType::Concrete(Family::Saturation)
        );
        assert!("quadratic".parse::<FitType>().is_err());
    }

    #[test]
    fn fit_type_cycle_visits_every_variant_once() {
        let mut cur = FitType::Auto;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(cur);
            cur = cur.next();
        }
        assert_eq!(cur, FitType::Auto);
        for family in Family::ALL {
            assert!(seen.contains(&FitType::Concrete(family)));
        }
    }

    #[test]
    fn fit_type_serializes_as_key() {
        let json = serde_json::to_string(&FitType::Concrete(Family::Logarithmic)).unwrap();
        assert_eq!(json, "\"logarithmic\"");
        let back: FitType = serde_json::from_str("\"optimal\"").unwrap();
        assert_eq!(back, FitType::Auto);
    }

    #[test]
    fn default_params_are_one_zero() {
        assert_eq!(Params::default(), Params::new(1.0, 0.0));
    }

    #[test]
    fn stats_reject_empty() {
        assert!(DatasetStats::from_samples(&[]).is_none());
        let stats =
            DatasetStats::from_samples(&[Sample::new(2.0, -1.0), Sample::new(-3.0, 4.0)]).unwrap();
        assert_eq!(stats.x_min, -3.0);
        assert_eq!(stats.x_max, 2.0);
        assert_eq!(stats.y_min, -1.0);
        assert_eq!(stats.y_max, 4.0);
    }
}

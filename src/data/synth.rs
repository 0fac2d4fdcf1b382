//! Synthetic point generation for demos and tests.
//!
//! Points are drawn from a known family/params on an evenly spaced x grid,
//! with additive Gaussian noise on y. Generation is reproducible for a given
//! seed.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use tracing::debug;

use crate::domain::{Family, Params, Sample};
use crate::error::AppError;
use crate::models::predict;

/// What to generate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthSpec {
    pub family: Family,
    pub params: Params,
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    /// Standard deviation of the additive y noise (0 = exact points).
    pub noise: f64,
    pub seed: u64,
}

/// Generate noisy samples of `spec.family` with `spec.params`.
///
/// x values where the model is undefined (e.g. `ln(x)` for `x <= 0`) are
/// skipped, so the result may hold fewer than `n_points` samples.
pub fn generate_samples(spec: &SynthSpec) -> Result<Vec<Sample>, AppError> {
    if spec.n_points == 0 {
        return Err(AppError::new(2, "Point count must be > 0."));
    }
    if !(spec.x_min.is_finite() && spec.x_max.is_finite() && spec.x_max >= spec.x_min) {
        return Err(AppError::new(2, "Invalid x range for point generation."));
    }
    if !(spec.noise.is_finite() && spec.noise >= 0.0) {
        return Err(AppError::new(2, "Noise must be a finite value >= 0."));
    }
    if !spec.params.is_finite() {
        return Err(AppError::new(2, "Model parameters must be finite."));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let normal = Normal::new(0.0, spec.noise)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let step = if spec.n_points > 1 {
        (spec.x_max - spec.x_min) / (spec.n_points as f64 - 1.0)
    } else {
        0.0
    };

    let mut points = Vec::with_capacity(spec.n_points);
    for i in 0..spec.n_points {
        let x = spec.x_min + i as f64 * step;
        let clean = predict(spec.family, x, &spec.params);
        if !clean.is_finite() {
            continue;
        }
        let y = clean + normal.sample(&mut rng);
        points.push(Sample { x, y });
    }

    debug!(
        family = spec.family.key(),
        requested = spec.n_points,
        generated = points.len(),
        "synthetic points"
    );

    if points.is_empty() {
        return Err(AppError::new(
            3,
            format!("The {} model is undefined on the requested x range.", spec.family.display_name()),
        ));
    }
    Ok(points)
}

/// Write samples as an `x,y` CSV readable by the ingest.
pub fn write_samples_csv(path: &std::path::Path, samples: &[Sample]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(4, format!("Failed to create CSV '{}': {e}", path.display())))?;
    let row_err = |e: csv::Error| AppError::new(4, format!("Failed to write CSV row: {e}"));

    writer.write_record(["x", "y"]).map_err(row_err)?;
    for s in samples {
        writer
            .write_record([s.x.to_string(), s.y.to_string()])
            .map_err(row_err)?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to write CSV: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(family: Family) -> SynthSpec {
        SynthSpec {
            family,
            params: Params::new(10.0, 0.3),
            n_points: 30,
            x_min: 0.0,
            x_max: 20.0,
            noise: 0.2,
            seed: 42,
        }
    }

    #[test]
    fn same_seed_same_points() {
        let a = generate_samples(&spec(Family::Saturation)).unwrap();
        let b = generate_samples(&spec(Family::Saturation)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 30);
        assert_eq!(a[0].x, 0.0);
        assert_eq!(a[29].x, 20.0);
    }

    #[test]
    fn zero_noise_is_exact() {
        let s = SynthSpec {
            noise: 0.0,
            ..spec(Family::Linear)
        };
        for p in generate_samples(&s).unwrap() {
            assert_eq!(p.y, 10.0 * p.x + 0.3);
        }
    }

    #[test]
    fn logarithmic_skips_non_positive_x() {
        let pts = generate_samples(&spec(Family::Logarithmic)).unwrap();
        assert_eq!(pts.len(), 29);
        assert!(pts.iter().all(|p| p.x > 0.0));
    }

    #[test]
    fn rejects_bad_settings() {
        let s = SynthSpec {
            n_points: 0,
            ..spec(Family::Linear)
        };
        assert_eq!(generate_samples(&s).unwrap_err().exit_code(), 2);

        let s = SynthSpec {
            x_min: 5.0,
            x_max: 1.0,
            ..spec(Family::Linear)
        };
        assert_eq!(generate_samples(&s).unwrap_err().exit_code(), 2);

        let s = SynthSpec {
            noise: -1.0,
            ..spec(Family::Linear)
        };
        assert_eq!(generate_samples(&s).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn csv_output_reads_back() {
        let pts = generate_samples(&spec(Family::Exponential)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pts.csv");
        write_samples_csv(&path, &pts).unwrap();
        let data = crate::io::load_points(&path).unwrap();
        assert_eq!(data.sets[0].1, pts);
    }
}

//! Shared "fit pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! dataset points -> resolve fit type -> estimate/score -> sampled curve
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use rayon::prelude::*;
use tracing::info;

use crate::domain::{DatasetStats, FitConfig, FitType, Sample};
use crate::fit::selection::{FitSelection, fit_and_select};
use crate::fit::sampler::sample_fit;
use crate::session::{Dataset, Workspace};

/// Everything a front-end needs to draw one dataset.
#[derive(Debug, Clone)]
pub struct DatasetFit {
    pub dataset_id: u64,
    pub name: String,
    pub color: String,
    pub points: Vec<Sample>,
    /// Fit type as requested (possibly `Auto`).
    pub fit_type: FitType,
    /// `None` when the dataset has fewer than two points.
    pub selection: Option<FitSelection>,
    pub curve: Vec<Sample>,
    pub stats: Option<DatasetStats>,
}

impl DatasetFit {
    /// True when a fit exists but nothing of it can be drawn.
    pub fn is_degenerate(&self) -> bool {
        self.selection.is_some() && self.curve.is_empty()
    }
}

/// Fit a single dataset.
pub fn fit_dataset(dataset: &Dataset, config: &FitConfig) -> DatasetFit {
    let fit_type = config.fit_type.unwrap_or(dataset.fit_type);
    let points = dataset.points.clone();

    let (selection, curve) = if points.len() >= 2 {
        let selection = fit_and_select(&points, fit_type);
        let curve = sample_fit(&points, &selection.best, config.curve_steps);
        (Some(selection), curve)
    } else {
        (None, Vec::new())
    };

    DatasetFit {
        dataset_id: dataset.id,
        name: dataset.name.clone(),
        color: dataset.color.clone(),
        stats: DatasetStats::from_samples(&points),
        points,
        fit_type,
        selection,
        curve,
    }
}

/// Fit every visible dataset of the workspace.
///
/// Datasets are independent, so they are fitted in parallel; the output keeps
/// workspace order.
pub fn fit_workspace(workspace: &Workspace, config: &FitConfig) -> Vec<DatasetFit> {
    let fits: Vec<DatasetFit> = workspace
        .datasets()
        .par_iter()
        .filter(|d| d.visible)
        .map(|d| fit_dataset(d, config))
        .collect();

    info!(
        datasets = fits.len(),
        fitted = fits.iter().filter(|f| f.selection.is_some()).count(),
        "workspace fitted"
    );
    fits
}

//! Paper scale suggestions for printing a chart on A4.
//!
//! The drawable area is taken as 26 × 16 cm (landscape) or 16 × 26 cm
//! (portrait). The suggested scale is the data range per centimetre along each
//! axis, computed over every point of every dataset.

use crate::domain::DatasetStats;
use crate::report::format::fixed;
use crate::session::Workspace;

const A4_LONG_CM: f64 = 26.0;
const A4_SHORT_CM: f64 = 16.0;

/// Units per centimetre along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub x_per_cm: f64,
    pub y_per_cm: f64,
}

impl AxisScale {
    pub fn label(&self) -> String {
        format!(
            "X: {} units/cm | Y: {} units/cm",
            fixed(self.x_per_cm, 2),
            fixed(self.y_per_cm, 2)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperScale {
    pub landscape: AxisScale,
    pub portrait: AxisScale,
}

/// Returns `None` when the workspace has no points.
pub fn auto_scale(workspace: &Workspace) -> Option<PaperScale> {
    let points: Vec<_> = workspace.all_points().copied().collect();
    let stats = DatasetStats::from_samples(&points)?;
    let x_range = stats.x_max - stats.x_min;
    let y_range = stats.y_max - stats.y_min;

    Some(PaperScale {
        landscape: AxisScale {
            x_per_cm: x_range / A4_LONG_CM,
            y_per_cm: y_range / A4_SHORT_CM,
        },
        portrait: AxisScale {
            x_per_cm: x_range / A4_SHORT_CM,
            y_per_cm: y_range / A4_LONG_CM,
        },
    })
}

/// `(landscape, portrait)` labels, `--` when there is nothing to scale.
pub fn auto_scale_labels(workspace: &Workspace) -> (String, String) {
    match auto_scale(workspace) {
        Some(scale) => (scale.landscape.label(), scale.portrait.label()),
        None => ("--".to_string(), "--".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sample;

    #[test]
    fn empty_workspace_has_no_scale() {
        let ws = Workspace::new();
        assert!(auto_scale(&ws).is_none());
        assert_eq!(auto_scale_labels(&ws), ("--".to_string(), "--".to_string()));
    }

    #[test]
    fn scale_spans_all_datasets() {
        let ws = Workspace::from_named_points(vec![
            ("a".to_string(), vec![Sample::new(0.0, 0.0), Sample::new(13.0, 4.0)]),
            ("b".to_string(), vec![Sample::new(26.0, 16.0)]),
        ]);
        let scale = auto_scale(&ws).unwrap();
        assert_eq!(scale.landscape, AxisScale { x_per_cm: 1.0, y_per_cm: 1.0 });
        assert_eq!(scale.portrait.x_per_cm, 26.0 / 16.0);
        assert_eq!(scale.portrait.y_per_cm, 16.0 / 26.0);

        let (landscape, portrait) = auto_scale_labels(&ws);
        assert_eq!(landscape, "X: 1.00 units/cm | Y: 1.00 units/cm");
        assert!(portrait.ends_with("| Y: 0.62 units/cm"), "{portrait}");
    }
}

//! Formatted terminal output: equations, summaries, point tables.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::app::pipeline::DatasetFit;
use crate::domain::{Family, FitConfig, Params, Sample};

/// Placeholder equation shown when a dataset has fewer than two points.
pub const EQUATION_PLACEHOLDER: &str = "y = ...";
/// Placeholder R² shown when a dataset has fewer than two points.
pub const R_SQUARED_PLACEHOLDER: &str = "0.000";

/// Render the fitted equation with 3-decimal coefficients.
pub fn format_equation(family: Family, params: &Params) -> String {
    let a = fixed(params.a, 3);
    let b = fixed(params.b, 3);
    match family {
        Family::Linear => format!("y = {a}x + {b}"),
        Family::Exponential => format!("y = {a}e^({b}x)"),
        Family::Logarithmic => format!("y = {a}ln(x) + {b}"),
        Family::Saturation => format!("y = {a}(1 - e^(-{b}x))"),
    }
}

pub fn format_r_squared(r_squared: f64) -> String {
    fixed(r_squared, 3)
}

/// Equation and R² for one dataset, with placeholders when it is not fitted.
pub fn equation_and_score(fit: &DatasetFit) -> (String, String) {
    match &fit.selection {
        Some(selection) => (
            format_equation(selection.best.family, &selection.best.params),
            format_r_squared(selection.best.r_squared),
        ),
        None => (
            EQUATION_PLACEHOLDER.to_string(),
            R_SQUARED_PLACEHOLDER.to_string(),
        ),
    }
}

/// Format the full run summary (per dataset stats + candidate diagnostics + chosen fit).
pub fn format_run_summary(fits: &[DatasetFit], config: &FitConfig) -> String {
    let mut out = String::new();

    out.push_str("=== cfit - Curve Fit ===\n");
    out.push_str(&format!(
        "Datasets: {} | curve steps: {}\n",
        fits.len(),
        config.curve_steps
    ));

    for fit in fits {
        out.push('\n');
        out.push_str(&format!("[{}] fit={} ", fit.name, fit.fit_type.key()));
        match &fit.stats {
            Some(s) => out.push_str(&format!(
                "n={} | x=[{:.3}, {:.3}] | y=[{:.3}, {:.3}]\n",
                s.n_points, s.x_min, s.x_max, s.y_min, s.y_max
            )),
            None => out.push_str("n=0\n"),
        }

        let Some(selection) = &fit.selection else {
            out.push_str("  (needs at least 2 points)\n");
            continue;
        };

        out.push_str("  Candidates:\n");
        for candidate in &selection.fits {
            let chosen = if candidate.family == selection.best.family { "*" } else { " " };
            out.push_str(&format!(
                "  {chosen} {:<12} R²={:>8} a={} b={}\n",
                candidate.family.display_name(),
                format_r_squared(candidate.r_squared),
                fixed(candidate.params.a, 6),
                fixed(candidate.params.b, 6),
            ));
        }

        let (equation, r2) = equation_and_score(fit);
        out.push_str(&format!("  Equation: {equation}\n"));
        out.push_str(&format!("  R²: {r2}\n"));
        if fit.is_degenerate() {
            out.push_str("  (fitted curve has no finite points)\n");
        }
    }

    out
}

/// Format a point table with 2-decimal values.
pub fn format_points_table(points: &[Sample]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>4} {:>12} {:>12}\n", "#", "x", "y"));
    out.push_str(&format!("{:-<4} {:-<12} {:-<12}\n", "", "", ""));
    for (i, p) in points.iter().enumerate() {
        out.push_str(&format!(
            "{:>4} {:>12} {:>12}\n",
            i + 1,
            fixed(p.x, 2),
            fixed(p.y, 2)
        ));
    }
    out
}

/// Fixed-precision formatting.
///
/// Values that round to zero keep their sign (`-0.0001` -> `-0.000`); only an
/// exact zero of either sign prints unsigned.
pub(crate) fn fixed(v: f64, precision: usize) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{v:.precision$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FitType;
    use crate::session::Workspace;

    #[test]
    fn equation_templates() {
        let p = Params::new(2.0, 0.5);
        assert_eq!(format_equation(Family::Linear, &p), "y = 2.000x + 0.500");
        assert_eq!(format_equation(Family::Exponential, &p), "y = 2.000e^(0.500x)");
        assert_eq!(format_equation(Family::Logarithmic, &p), "y = 2.000ln(x) + 0.500");
        assert_eq!(
            format_equation(Family::Saturation, &p),
            "y = 2.000(1 - e^(-0.500x))"
        );
    }

    #[test]
    fn negative_intercept_keeps_plus_sign_template() {
        let p = Params::new(1.25, -3.0);
        assert_eq!(format_equation(Family::Linear, &p), "y = 1.250x + -3.000");
    }

    #[test]
    fn fixed_keeps_sign_of_small_negatives() {
        assert_eq!(fixed(-0.0, 3), "0.000");
        assert_eq!(fixed(-0.0001, 3), "-0.000");
        assert_eq!(fixed(-0.5, 1), "-0.5");
        assert_eq!(fixed(f64::NAN, 3), "NaN");
    }

    #[test]
    fn tiny_negative_coefficient_prints_signed_zero() {
        let p = Params::new(2.0, -0.0001);
        assert_eq!(format_equation(Family::Linear, &p), "y = 2.000x + -0.000");
    }

    #[test]
    fn placeholders_for_unfitted_dataset() {
        let ws = Workspace::new();
        let fit = crate::app::pipeline::fit_dataset(&ws.datasets()[0], &FitConfig::default());
        let (eq, r2) = equation_and_score(&fit);
        assert_eq!(eq, "y = ...");
        assert_eq!(r2, "0.000");
    }

    #[test]
    fn summary_marks_chosen_family() {
        let ws = Workspace::from_named_points(vec![(
            "line".to_string(),
            (0..4).map(|i| Sample::new(i as f64, i as f64)).collect(),
        )]);
        let config = FitConfig::default();
        let fits = crate::app::pipeline::fit_workspace(&ws, &config);
        let txt = format_run_summary(&fits, &config);
        assert!(txt.contains("[line] fit=auto n=4"));
        assert!(txt.contains("* Linear"));
        assert!(txt.contains("Equation: y = 1.000x + 0.000"));
        assert!(txt.contains("R²: 1.000"));
        assert_eq!(fits[0].fit_type, FitType::Auto);
    }

    #[test]
    fn points_table_rows() {
        let txt = format_points_table(&[Sample::new(1.0, 2.5), Sample::new(-0.5, 10.0)]);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "   1         1.00         2.50");
        assert_eq!(lines[3], "   2        -0.50        10.00");
    }
}

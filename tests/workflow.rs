//! File-level workflows: CSV in, fits, exports and workspace files out.

use std::fs;

use curve_fitter::app::pipeline::fit_workspace;
use curve_fitter::domain::{Family, FitConfig, FitType};
use curve_fitter::io::{load_points, read_workspace_json, write_curve_csv, write_html, write_workspace_json};
use curve_fitter::session::Workspace;

const TWO_SETS: &str = "\
dataset,x,y
line,0,1
line,1,3
growth,0,2
line,2,5
growth,1,3.2974425414
growth,2,5.4365636569
bad,oops,1
growth,3,8.9633781407
";

#[test]
fn csv_to_exports() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("points.csv");
    fs::write(&csv_path, TWO_SETS).unwrap();

    let ingest = load_points(&csv_path).unwrap();
    assert_eq!(ingest.row_errors.len(), 1);
    assert_eq!(ingest.row_errors[0].line, 8);
    let workspace = Workspace::from_named_points(ingest.sets);
    assert_eq!(workspace.len(), 2);

    let config = FitConfig {
        curve_steps: 10,
        ..FitConfig::default()
    };
    let fits = fit_workspace(&workspace, &config);
    let families: Vec<Family> = fits
        .iter()
        .map(|f| f.selection.as_ref().unwrap().best.family)
        .collect();
    assert_eq!(families, vec![Family::Linear, Family::Exponential]);

    let html_path = dir.path().join("out.html");
    write_html(&html_path, &workspace, &fits).unwrap();
    let html = fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("\"fittedCurve\""));
    assert!(html.contains("\"name\":\"growth\""));

    let curve_path = dir.path().join("curve.csv");
    write_curve_csv(&curve_path, &fits).unwrap();
    let curve = fs::read_to_string(&curve_path).unwrap();
    assert_eq!(curve.lines().count(), 1 + 2 * 11);
    assert!(curve.lines().any(|l| l.starts_with("growth,exponential,")));
}

#[test]
fn saved_workspace_refits_identically() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("points.csv");
    fs::write(&csv_path, TWO_SETS).unwrap();

    let mut workspace = Workspace::from_named_points(load_points(&csv_path).unwrap().sets);
    let growth = workspace.datasets()[1].id;
    workspace.set_fit_type(growth, FitType::Concrete(Family::Saturation));

    let ws_path = dir.path().join("ws.json");
    write_workspace_json(&ws_path, &workspace).unwrap();
    let loaded = read_workspace_json(&ws_path).unwrap();
    assert_eq!(loaded, workspace);

    let config = FitConfig::default();
    let before = fit_workspace(&workspace, &config);
    let after = fit_workspace(&loaded, &config);
    for (a, b) in before.iter().zip(&after) {
        assert_eq!(a.curve, b.curve);
    }
    assert_eq!(
        after[1].selection.as_ref().unwrap().best.family,
        Family::Saturation
    );
}

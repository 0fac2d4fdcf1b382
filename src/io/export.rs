//! Exports: standalone HTML chart page and sampled-curve CSV.
//!
//! The HTML export is a single self-contained file. The workspace state
//! (points plus pre-computed fitted curves) is embedded as JSON and drawn on a
//! canvas by a small inline script, so the page opens offline.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::app::pipeline::DatasetFit;
use crate::domain::Sample;
use crate::error::AppError;
use crate::report::{auto_scale_labels, equation_and_score};
use crate::session::Workspace;

/// Default file name for an HTML export: `curve-fitter-{unix_millis}.html`.
pub fn default_export_name() -> PathBuf {
    PathBuf::from(format!(
        "curve-fitter-{}.html",
        chrono::Utc::now().timestamp_millis()
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportState<'a> {
    datasets: Vec<ExportDataset<'a>>,
    current_dataset_id: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDataset<'a> {
    id: u64,
    name: &'a str,
    color: &'a str,
    fit_type: String,
    visible: bool,
    points: &'a [Sample],
    fitted_curve: &'a [Sample],
    equation: String,
    r_squared: String,
}

/// Serialize the embedded page state.
///
/// `fits` holds the visible datasets only; each becomes one entry with its
/// fitted curve.
pub fn export_state_json(workspace: &Workspace, fits: &[DatasetFit]) -> Result<String, AppError> {
    let datasets = fits
        .iter()
        .map(|fit| {
            let (equation, r_squared) = equation_and_score(fit);
            ExportDataset {
                id: fit.dataset_id,
                name: &fit.name,
                color: &fit.color,
                fit_type: fit.fit_type.key().to_string(),
                visible: true,
                points: &fit.points,
                fitted_curve: &fit.curve,
                equation,
                r_squared,
            }
        })
        .collect();

    let state = ExportState {
        datasets,
        current_dataset_id: workspace.current_id(),
    };
    serde_json::to_string(&state)
        .map_err(|e| AppError::new(4, format!("Failed to serialize export state: {e}")))
}

/// Render the standalone HTML page.
pub fn render_html(workspace: &Workspace, fits: &[DatasetFit]) -> Result<String, AppError> {
    // `</` would close the script element early.
    let state = export_state_json(workspace, fits)?.replace("</", "<\\/");
    let (landscape, portrait) = auto_scale_labels(workspace);

    let mut legend = String::new();
    for fit in fits {
        let (equation, r_squared) = equation_and_score(fit);
        legend.push_str(&format!(
            "<li><span class=\"swatch\" style=\"background:{}\"></span>{}: {} (R² = {})</li>\n",
            escape_html(&fit.color),
            escape_html(&fit.name),
            escape_html(&equation),
            r_squared
        ));
    }

    Ok(HTML_TEMPLATE
        .replace("{{LEGEND}}", &legend)
        .replace("{{SCALE_LANDSCAPE}}", &escape_html(&landscape))
        .replace("{{SCALE_PORTRAIT}}", &escape_html(&portrait))
        .replace("{{STATE}}", &state))
}

/// Write the standalone HTML page.
pub fn write_html(path: &Path, workspace: &Workspace, fits: &[DatasetFit]) -> Result<(), AppError> {
    let html = render_html(workspace, fits)?;
    let mut file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create HTML export '{}': {e}", path.display())))?;
    file.write_all(html.as_bytes())
        .map_err(|e| AppError::new(4, format!("Failed to write HTML export: {e}")))?;

    info!(path = %path.display(), datasets = fits.len(), "html export written");
    Ok(())
}

/// Write each sampled curve as `dataset,family,x,y` rows.
///
/// Datasets without a fit contribute no rows.
pub fn write_curve_csv(path: &Path, fits: &[DatasetFit]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(4, format!("Failed to create curve CSV '{}': {e}", path.display())))?;
    write_curve_rows(&mut writer, fits)?;
    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to write curve CSV: {e}")))?;

    info!(path = %path.display(), "curve csv written");
    Ok(())
}

fn write_curve_rows<W: Write>(writer: &mut csv::Writer<W>, fits: &[DatasetFit]) -> Result<(), AppError> {
    let row_err = |e: csv::Error| AppError::new(4, format!("Failed to write curve CSV row: {e}"));

    writer
        .write_record(["dataset", "family", "x", "y"])
        .map_err(row_err)?;
    for fit in fits {
        let Some(selection) = &fit.selection else {
            continue;
        };
        let family = selection.best.family.key();
        for s in &fit.curve {
            writer
                .write_record([
                    fit.name.as_str(),
                    family,
                    &s.x.to_string(),
                    &s.y.to_string(),
                ])
                .map_err(row_err)?;
        }
    }
    Ok(())
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const HTML_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Curve Fitter Export</title>
<style>
  body { font-family: sans-serif; margin: 24px; color: #222; }
  canvas { border: 1px solid #ccc; background: #fff; }
  ul { list-style: none; padding: 0; }
  .swatch { display: inline-block; width: 12px; height: 12px; margin-right: 8px; }
  .scale { color: #555; font-size: 0.9em; }
</style>
</head>
<body>
<h1>Curve Fitter Export</h1>
<canvas id="chart" width="900" height="560"></canvas>
<ul>
{{LEGEND}}</ul>
<p class="scale">A4 landscape: {{SCALE_LANDSCAPE}}<br>A4 portrait: {{SCALE_PORTRAIT}}</p>
<script id="state" type="application/json">{{STATE}}</script>
<script>
(function () {
  var state = JSON.parse(document.getElementById("state").textContent);
  var canvas = document.getElementById("chart");
  var ctx = canvas.getContext("2d");
  var pad = 50;
  var xs = [], ys = [];
  state.datasets.forEach(function (d) {
    d.points.concat(d.fittedCurve).forEach(function (p) { xs.push(p.x); ys.push(p.y); });
  });
  if (xs.length === 0) { return; }
  var xMin = Math.min.apply(null, xs), xMax = Math.max.apply(null, xs);
  var yMin = Math.min.apply(null, ys), yMax = Math.max.apply(null, ys);
  if (xMax === xMin) { xMin -= 0.5; xMax += 0.5; }
  if (yMax === yMin) { yMin -= 0.5; yMax += 0.5; }
  function px(x) { return pad + (x - xMin) / (xMax - xMin) * (canvas.width - 2 * pad); }
  function py(y) { return canvas.height - pad - (y - yMin) / (yMax - yMin) * (canvas.height - 2 * pad); }

  ctx.strokeStyle = "#999";
  ctx.beginPath();
  ctx.moveTo(pad, pad); ctx.lineTo(pad, canvas.height - pad); ctx.lineTo(canvas.width - pad, canvas.height - pad);
  ctx.stroke();
  ctx.fillStyle = "#555";
  ctx.fillText(xMin.toFixed(2), pad, canvas.height - pad + 16);
  ctx.fillText(xMax.toFixed(2), canvas.width - pad - 24, canvas.height - pad + 16);
  ctx.fillText(yMin.toFixed(2), 4, canvas.height - pad);
  ctx.fillText(yMax.toFixed(2), 4, pad + 4);

  state.datasets.forEach(function (d) {
    ctx.strokeStyle = d.color;
    ctx.fillStyle = d.color;
    ctx.lineWidth = d.id === state.currentDatasetId ? 2.5 : 1.5;
    if (d.fittedCurve.length > 1) {
      ctx.beginPath();
      d.fittedCurve.forEach(function (p, i) {
        if (i === 0) { ctx.moveTo(px(p.x), py(p.y)); } else { ctx.lineTo(px(p.x), py(p.y)); }
      });
      ctx.stroke();
    }
    d.points.forEach(function (p) {
      ctx.beginPath();
      ctx.arc(px(p.x), py(p.y), 4, 0, 2 * Math.PI);
      ctx.fill();
    });
  });
})();
</script>
</body>
</html>
"##;

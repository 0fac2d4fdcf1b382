//! CSV point ingest.
//!
//! Turns a CSV file into named point sets ready to load into a `Workspace`.
//!
//! Schema:
//! - `x`, `y` (required, case-insensitive, surrounding whitespace ignored)
//! - `dataset` (optional): rows sharing a name are grouped in first-seen order;
//!   without it every row lands in `Dataset 1`
//! - any other column is ignored
//!
//! Rows that fail to parse (or hold non-finite numbers) are skipped and reported
//! as row errors; the ingest only fails when no valid row remains.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::warn;

use crate::domain::{DatasetStats, Sample};
use crate::error::AppError;

const DEFAULT_DATASET: &str = "Dataset 1";

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: grouped points + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    /// `(dataset name, points)` in first-seen order.
    pub sets: Vec<(String, Vec<Sample>)>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load points from a CSV file.
pub fn load_points(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    read_points(file)
}

/// Load points from any CSV source.
pub fn read_points<R: Read>(source: R) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let x_col = required_column(&header_map, "x")?;
    let y_col = required_column(&header_map, "y")?;
    let dataset_col = header_map.get("dataset").copied();

    let mut sets: Vec<(String, Vec<Sample>)> = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let sample = match parse_sample(&record, x_col, y_col) {
            Ok(s) => s,
            Err(message) => {
                row_errors.push(RowError { line, message });
                continue;
            }
        };

        let name = dataset_col
            .and_then(|c| record.get(c))
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_DATASET);

        match sets.iter_mut().find(|(n, _)| n == name) {
            Some((_, points)) => points.push(sample),
            None => sets.push((name.to_string(), vec![sample])),
        }
    }

    for e in &row_errors {
        warn!(line = e.line, "skipped row: {}", e.message);
    }

    let rows_used = sets.iter().map(|(_, p)| p.len()).sum::<usize>();
    if rows_used == 0 {
        return Err(AppError::new(3, "No valid rows found in CSV."));
    }

    let all: Vec<Sample> = sets.iter().flat_map(|(_, p)| p.iter().copied()).collect();
    let stats = DatasetStats::from_samples(&all)
        .ok_or_else(|| AppError::new(3, "No valid points found in CSV."))?;

    Ok(IngestedData {
        sets,
        stats,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_ascii_lowercase(), i))
        .collect()
}

fn required_column(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, AppError> {
    header_map
        .get(name)
        .copied()
        .ok_or_else(|| AppError::new(2, format!("CSV is missing required column '{name}'.")))
}

fn parse_sample(record: &StringRecord, x_col: usize, y_col: usize) -> Result<Sample, String> {
    let x = parse_f64(record, x_col, "x")?;
    let y = parse_f64(record, y_col, "y")?;
    Ok(Sample { x, y })
}

fn parse_f64(record: &StringRecord, col: usize, name: &str) -> Result<f64, String> {
    let raw = record
        .get(col)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing value for '{name}'"))?;
    let v: f64 = raw
        .parse()
        .map_err(|_| format!("invalid number for '{name}': '{raw}'"))?;
    if !v.is_finite() {
        return Err(format!("non-finite value for '{name}': '{raw}'"));
    }
    Ok(v)
}

//! Read/write workspace JSON files.
//!
//! Workspace JSON is the saved form of an editing session: every dataset with
//! its points, color, fit type and visibility, plus the current selection.
//! Fitted curves are not stored; they are recomputed on load.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use tracing::info;

use crate::error::AppError;
use crate::session::Workspace;

/// Write a workspace JSON file.
pub fn write_workspace_json(path: &Path, workspace: &Workspace) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(4, format!("Failed to create workspace JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(BufWriter::new(file), workspace)
        .map_err(|e| AppError::new(4, format!("Failed to write workspace JSON: {e}")))?;

    info!(path = %path.display(), datasets = workspace.len(), "workspace saved");
    Ok(())
}

/// Read a workspace JSON file.
///
/// The loaded workspace goes through `Workspace::validate`, so files without
/// datasets or with duplicate ids are rejected.
pub fn read_workspace_json(path: &Path) -> Result<Workspace, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open workspace JSON '{}': {e}", path.display()))
    })?;
    let mut workspace: Workspace = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid workspace JSON: {e}")))?;

    workspace.validate().map_err(|e| {
        AppError::new(e.exit_code(), format!("Invalid workspace JSON: {}", e.message()))
    })?;
    Ok(workspace)
}

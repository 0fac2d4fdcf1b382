//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - observations (`Sample`) and summary stats (`DatasetStats`)
//! - curve families (`Family`, `FitType`)
//! - fit outputs (`Params`, `FitResult`)
//! - run configuration (`FitConfig`)

pub mod types;

pub use types::*;

//! `curve-fitter` library crate.
//!
//! Fits two-parameter curves (linear, exponential, logarithmic, saturation)
//! to point sets and picks the best family by R². The binary (`cfit`) is a
//! thin wrapper around this library so that core logic is testable without
//! spawning processes.
//!
//! The engine (`models`, `math`, `fit`) is pure and never fails; degenerate
//! input yields default parameters or non-finite values that callers filter.
//! Everything else (`session`, `io`, `report`, `plot`, `tui`, `app`) is the
//! host around it.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod session;
pub mod tui;

//! Data sources beyond CSV files.

pub mod synth;

pub use synth::*;

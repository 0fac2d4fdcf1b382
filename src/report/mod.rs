//! Reporting utilities: equations, run summaries, and paper scale hints.

pub mod format;
pub mod scale;

pub use format::*;
pub use scale::*;

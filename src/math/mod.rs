//! Mathematical utilities: closed-form straight-line least squares.

pub mod ols;

pub use ols::*;

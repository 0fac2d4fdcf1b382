//! Curve fitting engine.
//!
//! Responsibilities:
//!
//! - estimate `(a, b)` for a concrete family (`estimator`)
//! - score a fit by R² (`score`)
//! - pick the best family when the fit type is `Auto` (`selection`)
//! - sample the fitted curve for plotting (`sampler`)
//!
//! Every operation is a pure function of its inputs; nothing here keeps state
//! between calls.

pub mod estimator;
pub mod sampler;
pub mod score;
pub mod selection;

pub use estimator::*;
pub use sampler::*;
pub use score::*;
pub use selection::*;

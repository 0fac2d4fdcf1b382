//! Input/output helpers.
//!
//! - CSV point ingest + validation (`ingest`)
//! - workspace JSON read/write (`workspace`)
//! - HTML page and curve CSV exports (`export`)

pub mod export;
pub mod ingest;
pub mod workspace;

pub use export::*;
pub use ingest::*;
pub use workspace::*;

//! Dataset bookkeeping for interactive and batch front-ends.
//!
//! A `Workspace` is an ordered list of datasets plus the id of the current one.
//! It owns no fitting logic: front-ends hand each dataset's points to the
//! engine (see `app::pipeline`) whenever something changes.

pub mod palette;
pub mod workspace;

pub use palette::*;
pub use workspace::*;

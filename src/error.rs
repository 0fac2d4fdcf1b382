//! Application error type.
//!
//! The fitting engine itself never fails (it degrades to default parameters or
//! non-finite values). `AppError` is only used by the host layer: file I/O,
//! CLI validation, and the terminal UI.
//!
//! Exit codes:
//! - `2`: usage or input file problems
//! - `3`: no usable data
//! - `4`: runtime / output failures

use thiserror::Error;

#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#![forbid(unsafe_code)]

//! Top-level error type for command execution

use crate::config::ConfigError;
use crate::sheets::SheetError;
use thiserror::Error;

/// Operational failures that end a command with a non-zero exit
///
/// Missing words and broken sheet data are not errors; they are part of the
/// search report.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sheets(#[from] SheetError),

    #[error("{failed} sheet operation(s) failed")]
    SyncFailed { failed: usize },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ResolverError>;

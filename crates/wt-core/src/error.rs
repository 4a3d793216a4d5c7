//! Framework error type.
//!
//! Sub-crates define their own error enums (`ScheduleError`, `SimError`,
//! `OutputError`) and wrap `WtError` where a core failure can surface.

use thiserror::Error;

use crate::CellId;

/// The top-level error type for `wt-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum WtError {
    #[error("cell {0} not found")]
    CellNotFound(CellId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `wt-*` crates.
pub type WtResult<T> = Result<T, WtError>;

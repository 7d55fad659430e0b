//! Core library for `to_trash`.
//!
//! Moves files into a trash directory instead of deleting them, records every
//! move in a JSON-lines history ledger, and restores selected entries through
//! an interactive terminal session.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod history;
pub mod output;
pub mod restore;
pub mod shutdown;

pub use config::{Config, LogLevel};
pub use errors::{Result, TrashError};
pub use fs_ops::{BatchOutcome, MoveFailure, MoveRequest, ResolvedPath, move_batch, resolve_path};
pub use history::{History, MoveRecord};

/// Common imports for callers driving a trash run.
pub mod prelude {
    pub use crate::config::{Config, LogLevel, load_config};
    pub use crate::errors::{Result, TrashError};
    pub use crate::fs_ops::{BatchOutcome, MoveRequest, ResolvedPath, move_batch, resolve_path, tilde_display};
    pub use crate::history::{History, MoveRecord};
    pub use crate::restore::{RestoreOutcome, RestoreTheme, run_restore};
}

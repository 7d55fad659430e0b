//! Typed error definitions for to_trash.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrashError {
    #[error("no such file or directory: {0}")]
    NotFound(PathBuf),

    #[error("{context} ({path})")]
    Internal { path: PathBuf, context: String },

    #[error("refusing to trash {0}: it is the trash directory, contains it, or is already inside it")]
    RefuseTrashDir(PathBuf),

    #[error("history ledger {path}: {context}")]
    LedgerIo { path: PathBuf, context: String },

    #[error("failed to move {}", PathList(.paths))]
    BatchPartialFailure { paths: Vec<PathBuf> },

    #[error("operation interrupted by user")]
    Interrupted,

    #[error("config {path}: {context}")]
    Config { path: PathBuf, context: String },

    #[error("terminal: {0}")]
    Terminal(#[source] std::io::Error),
}

impl TrashError {
    /// Stable numeric code, emitted as a structured log field.
    pub fn code(&self) -> u8 {
        match self {
            TrashError::NotFound(_) => 2,
            TrashError::Internal { .. } => 3,
            TrashError::RefuseTrashDir(_) => 4,
            TrashError::LedgerIo { .. } => 5,
            TrashError::BatchPartialFailure { .. } => 6,
            TrashError::Interrupted => 130,
            TrashError::Config { .. } => 7,
            TrashError::Terminal(_) => 8,
        }
    }

    /// Short machine-friendly name for the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            TrashError::NotFound(_) => "not_found",
            TrashError::Internal { .. } => "internal",
            TrashError::RefuseTrashDir(_) => "refuse_trash_dir",
            TrashError::LedgerIo { .. } => "ledger_io",
            TrashError::BatchPartialFailure { .. } => "batch_partial_failure",
            TrashError::Interrupted => "interrupted",
            TrashError::Config { .. } => "config",
            TrashError::Terminal(_) => "terminal",
        }
    }

    pub(crate) fn internal(path: impl Into<PathBuf>, context: impl Into<String>) -> Self {
        TrashError::Internal {
            path: path.into(),
            context: context.into(),
        }
    }

    pub(crate) fn ledger(path: impl Into<PathBuf>, context: impl Into<String>) -> Self {
        TrashError::LedgerIo {
            path: path.into(),
            context: context.into(),
        }
    }
}

/// Renders `[a, b, c]` for the aggregated batch error.
struct PathList<'a>(&'a [PathBuf]);

impl fmt::Display for PathList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", p.display())?;
        }
        f.write_str("]")
    }
}

pub type Result<T, E = TrashError> = std::result::Result<T, E>;

//! Move requests: a source and a candidate destination.

use std::path::{Path, PathBuf};

use crate::errors::{Result, TrashError};

use super::resolve::ResolvedPath;

/// One relocation to perform. The destination is a candidate until the
/// collision passes have run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl MoveRequest {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// `<trash_dir>/<file name of source>`, refusing the trash directory itself,
    /// its ancestors, and anything already inside it.
    ///
    /// Both paths must be valid UTF-8: the ledger stores them as JSON strings,
    /// and a move that cannot be recorded could never be restored.
    pub fn into_trash(source: &ResolvedPath, trash_dir: &Path) -> Result<Self> {
        let name = source
            .file_name()
            .ok_or_else(|| TrashError::internal(source.as_path(), "path has no file name"))?;
        ensure_outside_trash(source, trash_dir)?;
        let destination = trash_dir.join(name);
        for p in [source.as_path(), destination.as_path()] {
            if p.to_str().is_none() {
                return Err(TrashError::internal(p, "path is not valid UTF-8; it could not be recorded for restore"));
            }
        }
        Ok(Self::new(source.as_path(), destination))
    }
}

/// Compare with symlinks resolved on the parent side only, so a symlink to the
/// trash directory may still be trashed as a link.
fn ensure_outside_trash(candidate: &ResolvedPath, trash_dir: &Path) -> Result<()> {
    let trash_real = dunce::canonicalize(trash_dir).unwrap_or_else(|_| trash_dir.to_path_buf());
    let cand_real = match (candidate.parent(), candidate.file_name()) {
        (Some(parent), Some(name)) => dunce::canonicalize(parent)
            .map(|p| p.join(name))
            .unwrap_or_else(|_| candidate.as_path().to_path_buf()),
        _ => candidate.as_path().to_path_buf(),
    };

    if trash_real.starts_with(&cand_real) || cand_real.starts_with(&trash_real) {
        Err(TrashError::RefuseTrashDir(candidate.as_path().to_path_buf()))
    } else {
        Ok(())
    }
}

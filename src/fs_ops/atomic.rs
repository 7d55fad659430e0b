//! Atomic rename helper.
//! - Creates missing parent directories of the destination first.
//! - Performs a single `rename`; there is no copy fallback, a cross-device
//!   move fails with a hint instead.
//! - On Unix, best-effort fsync of the destination directory after the rename.

use std::fs;
#[cfg(unix)]
use std::fs::File;
#[cfg(unix)]
use std::io;
use std::path::Path;

use crate::errors::Result;

use super::helpers::io_error_with_help;

pub fn try_atomic_move(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(io_error_with_help("create destination directory", parent))?;
    }

    // A vanished source surfaces as NotFound(src), not as a missing destination.
    fs::rename(src, dst).map_err(io_error_with_help("rename", src))?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // Ignore fsync errors to avoid turning a successful rename into a failure.
        let _ = fsync_dir(parent);
    }

    Ok(())
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

//! Trash directory preparation.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::{Result, TrashError};
use crate::fs_ops::io_error_with_help;

use super::types::Config;

impl Config {
    /// Make sure the trash directory exists and is a directory, creating it
    /// (mode 0700 on Unix) when missing.
    pub fn prepare_trash_dir(&self) -> Result<()> {
        ensure_dir_is_or_create(&self.trash_dir)
    }
}

fn ensure_dir_is_or_create(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {
            debug!(trash_dir = %path.display(), "trash directory present");
            Ok(())
        }
        Ok(_) => Err(TrashError::internal(path, "trash directory exists but is not a directory")),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            create_private_dir(path).map_err(io_error_with_help("create trash directory", path))?;
            info!(trash_dir = %path.display(), "created trash directory");
            Ok(())
        }
        Err(e) => Err(TrashError::internal(path, format!("stat trash directory: {e}"))),
    }
}

#[cfg(unix)]
fn create_private_dir(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(path)
}

#[cfg(not(unix))]
fn create_private_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_missing_trash_dir() {
        let td = tempdir().unwrap();
        let cfg = Config::new(td.path().join("a").join(".myTrash"));
        cfg.prepare_trash_dir().unwrap();
        assert!(cfg.trash_dir.is_dir());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&cfg.trash_dir).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }
    }

    #[test]
    fn file_in_the_way_is_an_error() {
        let td = tempdir().unwrap();
        let p = td.path().join("trash");
        fs::write(&p, b"x").unwrap();
        assert!(Config::new(&p).prepare_trash_dir().is_err());
    }
}

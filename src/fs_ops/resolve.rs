//! Resolving user-supplied paths.
//! - `~/` expands to the home directory (HOME, then USERPROFILE, then the platform default).
//! - Relative paths are made absolute against the current directory and `.`/`..`
//!   are removed lexically; symlinks are never followed, so a link is trashed as a link.
//! - The result must exist (`symlink_metadata`, so dangling links count).

use path_absolutize::Absolutize;
use std::env;
use std::ffi::OsString;
use std::fmt;
use std::io;
use std::ops::Deref;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::errors::{Result, TrashError};

/// An absolute, tilde-expanded path that existed when it was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResolvedPath(PathBuf);

impl ResolvedPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl Deref for ResolvedPath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

/// Home directory: `HOME`, else `USERPROFILE`, else whatever the platform reports.
pub fn home_dir() -> Option<PathBuf> {
    let from_env = |key: &str| env::var_os(key).filter(|v| !v.is_empty()).map(PathBuf::from);
    from_env("HOME")
        .or_else(|| from_env("USERPROFILE"))
        .or_else(dirs::home_dir)
}

/// Expand a leading `~` or `~/`. Other forms (`~user`) are left untouched.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match home_dir() {
            Some(home) if components.as_path().as_os_str().is_empty() => home,
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Tilde expansion plus lexical absolutization. Does not touch the filesystem.
pub fn normalize_path(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(TrashError::internal(path, "empty path"));
    }
    let expanded = expand_tilde(path);
    let absolute = expanded
        .absolutize()
        .map_err(|e| TrashError::internal(path, format!("normalize path: {e}")))?;
    Ok(absolute.into_owned())
}

/// Normalize `path` and confirm it exists.
pub fn resolve_path(path: &Path) -> Result<ResolvedPath> {
    let normalized = normalize_path(path)?;
    match std::fs::symlink_metadata(&normalized) {
        Ok(_) => {
            debug!(input = %path.display(), resolved = %normalized.display(), "resolved path");
            Ok(ResolvedPath(normalized))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(TrashError::NotFound(path.to_path_buf())),
        Err(e) => Err(TrashError::internal(&normalized, format!("stat failed: {e}"))),
    }
}

/// Replace a leading home directory with `~` for display.
pub fn tilde_display(path: &Path) -> String {
    match home_dir() {
        Some(home) => tilde_display_with(path, &home),
        None => path.display().to_string(),
    }
}

pub(crate) fn tilde_display_with(path: &Path, home: &Path) -> String {
    if home.as_os_str().is_empty() || home == Path::new("/") {
        return path.display().to_string();
    }
    match path.strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => {
            let mut shown = OsString::from("~");
            shown.push(std::path::MAIN_SEPARATOR_STR);
            shown.push(rest.as_os_str());
            PathBuf::from(shown).display().to_string()
        }
        Err(_) => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_display_maps_home_prefix() {
        let home = Path::new("/home/user");
        assert_eq!(
            tilde_display_with(Path::new("/home/user/.myTrash/a.txt"), home),
            format!("~{}.myTrash/a.txt", std::path::MAIN_SEPARATOR)
        );
        assert_eq!(tilde_display_with(Path::new("/home/user"), home), "~");
        assert_eq!(tilde_display_with(Path::new("/home/username/x"), home), "/home/username/x");
        assert_eq!(tilde_display_with(Path::new("/etc/hosts"), home), "/etc/hosts");
    }

    #[test]
    fn empty_path_is_internal_error() {
        let err = normalize_path(Path::new("")).unwrap_err();
        assert!(matches!(err, TrashError::Internal { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn dotdot_is_removed_lexically() {
        let p = normalize_path(Path::new("/a/b/../c/./d.txt")).unwrap();
        assert_eq!(p, PathBuf::from("/a/c/d.txt"));
    }

    #[test]
    fn tilde_user_form_left_alone() {
        assert_eq!(expand_tilde(Path::new("~other/x")), PathBuf::from("~other/x"));
        assert_eq!(expand_tilde(Path::new("/abs/~/x")), PathBuf::from("/abs/~/x"));
    }
}

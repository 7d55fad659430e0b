//! I/O error adapters.
//!
//! Turn a raw `io::Error` into a `TrashError` whose message names the operation,
//! the path and, where the OS code is recognizable, a hint about the likely cause.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create directory", dir))?;
//!   file.write_all(buf).map_err(ledger_error_with_help("append", path))?;

use std::io;
use std::path::Path;

use crate::errors::TrashError;

fn hint_for(e: &io::Error) -> Option<&'static str> {
    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::EXDEV => Some("cross-filesystem; the trash directory must be on the same filesystem"),
            libc::EBUSY => Some("resource busy"),
            libc::ENOENT => Some("path not found"),
            libc::ENOSPC => Some("no space left on device"),
            libc::EROFS => Some("read-only filesystem"),
            libc::ENAMETOOLONG => Some("file name or path too long"),
            libc::ENOTEMPTY | libc::EEXIST => Some("destination exists and is not replaceable"),
            libc::EINVAL => Some("cannot move a directory into itself"),
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }

    #[cfg(windows)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            5 => Some("access denied; check permissions"),
            17 => Some("not same device; the trash directory must be on the same drive"),
            32 => Some("sharing violation; file is in use"),
            2 | 3 => Some("path not found"),
            112 => Some("insufficient disk space"),
            206 => Some("file name or path too long"),
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }

    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

/// `op 'path': error, then the hint and os code when known`
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    if let Some(hint) = hint_for(e) {
        msg.push_str(" — ");
        msg.push_str(hint);
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// For per-file operations: NotFound becomes `TrashError::NotFound(path)`,
/// everything else `TrashError::Internal` with a hinted message.
pub fn io_error_with_help<'a>(op: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> TrashError + 'a {
    move |e: io::Error| {
        if e.kind() == io::ErrorKind::NotFound {
            TrashError::NotFound(path.to_path_buf())
        } else {
            TrashError::internal(path, describe_io_error(op, path, &e))
        }
    }
}

/// For ledger file access: always `TrashError::LedgerIo`.
pub fn ledger_error_with_help<'a>(op: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> TrashError + 'a {
    move |e: io::Error| TrashError::ledger(path, describe_io_error(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_not_found_variant() {
        let p = Path::new("/nonexistent/file.txt");
        let err = io_error_with_help("rename", p)(io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, TrashError::NotFound(ref got) if got == p));
    }

    #[test]
    fn permission_denied_carries_hint() {
        let p = Path::new("/root/secret");
        let err = io_error_with_help("rename", p)(io::Error::from(io::ErrorKind::PermissionDenied));
        let msg = err.to_string();
        assert!(msg.contains("rename"), "msg was: {msg}");
        assert!(msg.contains("permission denied"), "msg was: {msg}");
    }

    #[cfg(unix)]
    #[test]
    fn cross_device_hint_and_code() {
        let p = Path::new("/mnt/other/a.txt");
        let msg = describe_io_error("rename", p, &io::Error::from_raw_os_error(libc::EXDEV));
        assert!(msg.contains("cross-filesystem"), "msg was: {msg}");
        assert!(msg.contains("os code"), "msg was: {msg}");
    }

    #[test]
    fn ledger_errors_are_ledger_io() {
        let p = Path::new("/t/go-to-trash-history.json");
        let err = ledger_error_with_help("open", p)(io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, TrashError::LedgerIo { .. }));
    }
}

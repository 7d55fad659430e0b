//! Destination collision resolution.
//!
//! Two passes:
//! 1. `resolve_batch` renumbers requests that share a destination inside one
//!    batch. The first keeps its name; the k-th later duplicate (0-indexed)
//!    becomes `stem(k).ext`, numbered in input order.
//! 2. `timestamped_destination` runs right before each rename: if something already
//!    exists at the destination, a timestamp is inserted before the extension
//!    (`stem.20240501T102030+0900.ext`).
//!
//! Pass 2 is racy by nature: nothing makes the existence check atomic with the
//! rename that follows.

use chrono::{DateTime, FixedOffset};
use std::collections::{HashMap, HashSet};
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::errors::{Result, TrashError};

use super::request::MoveRequest;

/// Sortable timestamp embedded in on-disk collision names. The offset is
/// rendered as `Z` for UTC and `+HHMM`/`-HHMM` otherwise.
pub const COLLISION_STAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

const MAX_STAMP_RETRIES: u32 = 1_000;

/// Pass 1: intra-batch dedup. Output destinations are pairwise distinct.
pub fn resolve_batch(requests: &[MoveRequest]) -> Vec<MoveRequest> {
    // Every original destination is claimed up front so a renumbered name can
    // never steal the name of a later first occurrence.
    let mut claimed: HashSet<PathBuf> = requests.iter().map(|r| r.destination.clone()).collect();
    let mut next_index: HashMap<&Path, u64> = HashMap::new();
    let mut out = Vec::with_capacity(requests.len());

    for req in requests {
        match next_index.get_mut(req.destination.as_path()) {
            None => {
                next_index.insert(req.destination.as_path(), 0);
                out.push(req.clone());
            }
            Some(k) => {
                let renamed = loop {
                    let candidate = with_name_suffix(&req.destination, &format!("({k})"));
                    *k += 1;
                    if claimed.insert(candidate.clone()) {
                        break candidate;
                    }
                    trace!(candidate = %candidate.display(), "batch candidate already claimed");
                };
                debug!(
                    src = %req.source.display(),
                    from = %req.destination.display(),
                    to = %renamed.display(),
                    "renumbered duplicate destination in batch"
                );
                out.push(MoveRequest::new(req.source.clone(), renamed));
            }
        }
    }
    out
}

/// Pass 2: if `dest` is taken on disk, return a timestamped sibling name.
pub fn timestamped_destination(dest: &Path, now: &DateTime<FixedOffset>) -> Result<PathBuf> {
    if !path_exists(dest)? {
        return Ok(dest.to_path_buf());
    }

    let stamp = collision_stamp(now);
    let candidate = with_name_suffix(dest, &format!(".{stamp}"));
    if !path_exists(&candidate)? {
        debug!(taken = %dest.display(), dest = %candidate.display(), "destination exists; using timestamped name");
        return Ok(candidate);
    }

    // Same second, same name: add a counter after the stamp.
    for n in 0..MAX_STAMP_RETRIES {
        let candidate = with_name_suffix(dest, &format!(".{stamp}({n})"));
        if !path_exists(&candidate)? {
            return Ok(candidate);
        }
    }
    Err(TrashError::internal(dest, "no free destination name found"))
}

/// `20240501T102030Z` or `20240501T102030+0900`.
pub fn collision_stamp(now: &DateTime<FixedOffset>) -> String {
    let mut stamp = now.format(COLLISION_STAMP_FORMAT).to_string();
    if now.offset().local_minus_utc() == 0 {
        stamp.push('Z');
    } else {
        stamp.push_str(&now.format("%z").to_string());
    }
    stamp
}

/// Existence without following symlinks: a dangling link still occupies the name.
fn path_exists(p: &Path) -> Result<bool> {
    match std::fs::symlink_metadata(p) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(TrashError::internal(p, format!("check destination: {e}"))),
    }
}

/// Insert `suffix` between the file stem and its extension.
///
/// - "foo.txt" + "(0)" -> "foo(0).txt"
/// - "archive.tar.gz" + "(0)" -> "archive.tar(0).gz"
/// - ".env" + "(0)" -> ".env(0)"
pub(crate) fn with_name_suffix(path: &Path, suffix: &str) -> PathBuf {
    let Some(name) = path.file_name() else {
        let mut raw = path.as_os_str().to_os_string();
        raw.push(suffix);
        return PathBuf::from(raw);
    };
    let base = Path::new(name);
    let stem = base.file_stem().unwrap_or(name);
    let new_name = build_name_with_suffix(stem, base.extension(), suffix);
    path.with_file_name(new_name)
}

#[cfg(windows)]
const MAX_FILENAME_LEN: usize = 240; // leave headroom for legacy MAX_PATH
#[cfg(not(windows))]
const MAX_FILENAME_LEN: usize = 255;

#[cfg(unix)]
fn name_len_units(s: &OsStr) -> usize {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes().len()
}

#[cfg(not(unix))]
fn name_len_units(s: &OsStr) -> usize {
    s.to_string_lossy().len()
}

/// Truncate the stem if needed so `stem + suffix + ["." + ext]` fits the platform limit.
fn build_name_with_suffix(stem: &OsStr, ext: Option<&OsStr>, suffix: &str) -> OsString {
    let mut overhead = suffix.len();
    if let Some(e) = ext {
        overhead += 1 + name_len_units(e);
    }

    let stem_os = if name_len_units(stem) + overhead > MAX_FILENAME_LEN {
        truncate_stem(stem, MAX_FILENAME_LEN.saturating_sub(overhead).max(1))
    } else {
        stem.to_os_string()
    };

    let mut new_name = stem_os;
    new_name.push(suffix);
    if let Some(e) = ext {
        new_name.push(".");
        new_name.push(e);
    }
    new_name
}

fn truncate_stem(stem: &OsStr, budget: usize) -> OsString {
    if let Some(s) = stem.to_str() {
        let mut end = 0;
        for (idx, ch) in s.char_indices() {
            if idx + ch.len_utf8() > budget {
                break;
            }
            end = idx + ch.len_utf8();
        }
        return OsString::from(if end == 0 { "f" } else { &s[..end] });
    }

    #[cfg(unix)]
    {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};
        let bytes = stem.as_bytes();
        OsString::from_vec(bytes[..bytes.len().min(budget)].to_vec())
    }
    #[cfg(not(unix))]
    {
        let lossy = stem.to_string_lossy().into_owned();
        truncate_stem(OsStr::new(&lossy), budget)
    }
}

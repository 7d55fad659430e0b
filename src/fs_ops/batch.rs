//! Concurrent batch mover.
//!
//! Every request becomes one rayon task; the call returns after all of them
//! have finished. Tasks never cancel each other, so one bad path does not stop
//! its siblings. Results come back through `collect`, in input order.

use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::errors::{Result, TrashError};
use crate::history::{MoveRecord, timestamp_now};
use crate::shutdown;

use super::atomic::try_atomic_move;
use super::collision::{resolve_batch, timestamped_destination};
use super::request::MoveRequest;

/// A request that could not be carried out.
#[derive(Debug)]
pub struct MoveFailure {
    /// Source path of the failed request.
    pub path: PathBuf,
    pub error: TrashError,
}

/// Successful moves and failures of one batch, each in input order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub moved: Vec<MoveRecord>,
    pub failures: Vec<MoveFailure>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_paths(&self) -> Vec<PathBuf> {
        self.failures.iter().map(|f| f.path.clone()).collect()
    }

    /// Record a failure that happened before the batch ran (e.g. path resolution).
    pub fn push_failure(&mut self, path: impl Into<PathBuf>, error: TrashError) {
        self.failures.push(MoveFailure {
            path: path.into(),
            error,
        });
    }

    /// `Ok(moved)` when nothing failed, otherwise `BatchPartialFailure` naming
    /// every failed path. Successful moves are not undone either way.
    pub fn into_result(self) -> Result<Vec<MoveRecord>> {
        if self.failures.is_empty() {
            Ok(self.moved)
        } else {
            Err(TrashError::BatchPartialFailure {
                paths: self.failures.into_iter().map(|f| f.path).collect(),
            })
        }
    }
}

/// Move every request, renumbering in-batch duplicates first.
/// With `dry_run` nothing on disk changes; the records describe what would happen.
pub fn move_batch(requests: &[MoveRequest], dry_run: bool) -> BatchOutcome {
    let planned = resolve_batch(requests);
    debug!(count = planned.len(), dry_run, "starting batch");

    let results: Vec<std::result::Result<MoveRecord, MoveFailure>> = planned
        .par_iter()
        .map(|req| {
            move_one(req, dry_run).map_err(|error| {
                warn!(
                    src = %req.source.display(),
                    dest = %req.destination.display(),
                    code = error.code(),
                    kind = error.kind(),
                    "move failed: {error}"
                );
                MoveFailure {
                    path: req.source.clone(),
                    error,
                }
            })
        })
        .collect();

    let mut outcome = BatchOutcome::default();
    for r in results {
        match r {
            Ok(rec) => outcome.moved.push(rec),
            Err(f) => outcome.failures.push(f),
        }
    }
    outcome
}

fn move_one(req: &MoveRequest, dry_run: bool) -> Result<MoveRecord> {
    if shutdown::is_requested() {
        return Err(TrashError::Interrupted);
    }

    let now = timestamp_now();
    let dest = timestamped_destination(&req.destination, &now)?;

    if dry_run {
        debug!(src = %req.source.display(), dest = %dest.display(), "dry run: skipping rename");
        return Ok(MoveRecord::new(&req.source, dest, now));
    }

    try_atomic_move(&req.source, &dest)?;
    debug!(src = %req.source.display(), dest = %dest.display(), "moved");
    Ok(MoveRecord::new(&req.source, dest, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn one_missing_source_does_not_stop_the_rest() {
        let td = tempdir().unwrap();
        let trash = td.path().join("trash");
        let a = td.path().join("a.txt");
        let c = td.path().join("c.txt");
        fs::write(&a, b"a").unwrap();
        fs::write(&c, b"c").unwrap();
        let ghost = td.path().join("b.txt");

        let reqs: Vec<_> = [&a, &ghost, &c]
            .into_iter()
            .map(|p| MoveRequest::new(p, trash.join(p.file_name().unwrap())))
            .collect();
        let outcome = move_batch(&reqs, false);

        assert_eq!(outcome.moved.len(), 2);
        assert_eq!(outcome.failed_paths(), vec![ghost.clone()]);
        assert!(matches!(outcome.failures[0].error, TrashError::NotFound(_)));
        assert!(trash.join("a.txt").exists());
        assert!(trash.join("c.txt").exists());

        let err = outcome.into_result().unwrap_err();
        assert!(matches!(err, TrashError::BatchPartialFailure { ref paths } if paths == &vec![ghost.clone()]));
    }

    #[test]
    fn dry_run_touches_nothing() {
        let td = tempdir().unwrap();
        let a = td.path().join("a.txt");
        fs::write(&a, b"a").unwrap();
        let trash = td.path().join("trash");

        let outcome = move_batch(&[MoveRequest::new(&a, trash.join("a.txt"))], true);
        assert!(outcome.is_success());
        assert_eq!(outcome.moved[0].to, trash.join("a.txt"));
        assert!(a.exists());
        assert!(!trash.exists());
    }
}

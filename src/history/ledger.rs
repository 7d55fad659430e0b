use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::{Result, TrashError};

use super::record::{MoveRecord, sort_by_removed_at};
use super::store;

/// Ledger file name inside the trash directory.
pub const HISTORY_FILE_NAME: &str = "go-to-trash-history.json";

/// What `History::reconcile` did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Records dropped as duplicates or because their trashed file is gone.
    pub removed: usize,
    /// Whether the ledger file was rewritten.
    pub rewritten: bool,
}

/// In-memory view of the ledger for one invocation.
#[derive(Debug)]
pub struct History {
    path: PathBuf,
    records: Vec<MoveRecord>,
}

impl History {
    /// Empty ledger bound to `<trash_dir>/go-to-trash-history.json`; nothing is read.
    pub fn new(trash_dir: &Path) -> Self {
        Self {
            path: trash_dir.join(HISTORY_FILE_NAME),
            records: Vec::new(),
        }
    }

    /// Read the ledger. A missing file is an empty ledger.
    pub fn load(trash_dir: &Path) -> Result<Self> {
        let mut history = Self::new(trash_dir);
        history.records = store::read_records(&history.path)?.unwrap_or_default();
        debug!(path = %history.path.display(), count = history.records.len(), "ledger loaded");
        Ok(history)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records ordered oldest first.
    pub fn sorted_records(&self) -> Vec<MoveRecord> {
        let mut out = self.records.clone();
        sort_by_removed_at(&mut out);
        out
    }

    /// Drop duplicate `to` entries (first wins) and entries whose trashed file
    /// no longer exists. Rewrites the file only when something was dropped.
    pub fn reconcile(&mut self) -> Result<ReconcileReport> {
        let before = self.records.len();
        let mut seen = HashSet::with_capacity(before);
        let mut kept = Vec::with_capacity(before);
        for rec in &self.records {
            if !seen.insert(rec.to.as_path()) {
                continue;
            }
            if still_in_trash(&rec.to)? {
                kept.push(rec.clone());
            } else {
                debug!(to = %rec.to.display(), "dropping ledger entry for missing file");
            }
        }
        self.records = kept;

        let removed = before - self.records.len();
        if removed == 0 {
            return Ok(ReconcileReport::default());
        }
        store::rewrite_records(&self.path, &self.records)?;
        info!(path = %self.path.display(), removed, "ledger reconciled");
        Ok(ReconcileReport { removed, rewritten: true })
    }

    /// Reconcile, then persist `new_records` (deduped by `to`, also against
    /// live records). Creates the file when missing, appends otherwise.
    pub fn update(&mut self, new_records: Vec<MoveRecord>) -> Result<()> {
        self.reconcile()?;
        if new_records.is_empty() {
            return Ok(());
        }

        let mut seen: HashSet<PathBuf> = self.records.iter().map(|r| r.to.clone()).collect();
        let fresh: Vec<MoveRecord> = new_records
            .into_iter()
            .filter(|r| seen.insert(r.to.clone()))
            .collect();
        if fresh.is_empty() {
            return Ok(());
        }

        let exists = match fs::symlink_metadata(&self.path) {
            Ok(_) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => return Err(TrashError::ledger(&self.path, format!("stat: {e}"))),
        };

        if exists {
            store::append_records(&self.path, &fresh)?;
            self.records.extend(fresh);
        } else {
            self.records.extend(fresh);
            store::rewrite_records(&self.path, &self.records)?;
        }
        Ok(())
    }
}

fn still_in_trash(p: &Path) -> Result<bool> {
    match fs::symlink_metadata(p) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(TrashError::internal(p, format!("stat ledger entry: {e}"))),
    }
}

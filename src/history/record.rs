//! One ledger line: where a file came from, where it went, and when.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, SubsecRound};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::fs_ops::MoveRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: PathBuf,
    pub to: PathBuf,
    #[serde(with = "rfc3339_seconds")]
    pub removed_at: DateTime<FixedOffset>,
}

impl MoveRecord {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>, removed_at: DateTime<FixedOffset>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            removed_at: removed_at.trunc_subsecs(0),
        }
    }

    /// The request that puts the file back where it came from.
    pub fn inverse(&self) -> MoveRequest {
        MoveRequest::new(self.to.clone(), self.from.clone())
    }
}

/// Local wall-clock time at second precision, offset included.
pub fn timestamp_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset().trunc_subsecs(0)
}

/// Stable sort by `removed_at`, oldest first.
pub fn sort_by_removed_at(records: &mut [MoveRecord]) {
    records.sort_by_key(|r| r.removed_at);
}

mod rfc3339_seconds {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<FixedOffset>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_removed_at(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<FixedOffset>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw).map_err(serde::de::Error::custom)
    }
}

/// `2024-05-01T10:20:30+09:00`, or `...Z` for UTC.
pub fn format_removed_at(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

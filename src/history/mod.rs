//! Trash history: the append-only JSON-lines ledger kept in the trash directory.

mod ledger;
mod record;
mod store;

pub use ledger::{HISTORY_FILE_NAME, History, ReconcileReport};
pub use record::{MoveRecord, format_removed_at, sort_by_removed_at, timestamp_now};

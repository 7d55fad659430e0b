//! Filesystem operations: path resolution, collision naming and the batch mover.

mod atomic;
mod batch;
mod collision;
mod helpers;
mod request;
mod resolve;

pub use atomic::try_atomic_move;
pub use batch::{BatchOutcome, MoveFailure, move_batch};
pub use collision::{COLLISION_STAMP_FORMAT, collision_stamp, resolve_batch, timestamped_destination};
pub use helpers::{describe_io_error, io_error_with_help, ledger_error_with_help};
pub use request::MoveRequest;
pub use resolve::{ResolvedPath, expand_tilde, home_dir, normalize_path, resolve_path, tilde_display};

//! Runs in its own test binary: the shutdown flag is process-wide and is
//! never cleared once set.

use std::fs;
use tempfile::tempdir;

use to_trash::TrashError;
use to_trash::fs_ops::{MoveRequest, move_batch};
use to_trash::shutdown;

#[test]
fn requested_shutdown_leaves_every_source_in_place() {
    let td = tempdir().unwrap();
    let trash = td.path().join("bin");
    let a = td.path().join("a.txt");
    let b = td.path().join("b.txt");
    fs::write(&a, b"a").unwrap();
    fs::write(&b, b"b").unwrap();

    shutdown::request();
    let outcome = move_batch(
        &[MoveRequest::new(&a, trash.join("a.txt")), MoveRequest::new(&b, trash.join("b.txt"))],
        false,
    );

    assert!(outcome.moved.is_empty());
    assert_eq!(outcome.failures.len(), 2);
    assert!(outcome.failures.iter().all(|f| matches!(f.error, TrashError::Interrupted)));
    assert!(a.exists() && b.exists());
    assert!(!trash.exists());
}

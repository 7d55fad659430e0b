use std::fs;
use tempfile::tempdir;

use to_trash::fs_ops::{MoveRequest, move_batch};

#[test]
fn restoring_a_record_puts_the_file_back() {
    let td = tempdir().unwrap();
    let src = td.path().join("src").join("x.txt");
    fs::create_dir_all(src.parent().unwrap()).unwrap();
    fs::write(&src, b"payload").unwrap();
    let trash = td.path().join("bin");

    let trashed = move_batch(&[MoveRequest::new(&src, trash.join("x.txt"))], false)
        .into_result()
        .unwrap();
    assert!(!src.exists());

    let restored = move_batch(&[trashed[0].inverse()], false).into_result().unwrap();
    assert_eq!(restored[0].to, src);
    assert_eq!(fs::read_to_string(&src).unwrap(), "payload");
    assert!(!trashed[0].to.exists());
}

#[test]
fn restoring_over_a_recreated_file_uses_a_timestamped_name() {
    let td = tempdir().unwrap();
    let src = td.path().join("src").join("x.txt");
    fs::create_dir_all(src.parent().unwrap()).unwrap();
    fs::write(&src, b"old").unwrap();
    let trash = td.path().join("bin");

    let trashed = move_batch(&[MoveRequest::new(&src, trash.join("x.txt"))], false)
        .into_result()
        .unwrap();
    fs::write(&src, b"new").unwrap();

    let restored = move_batch(&[trashed[0].inverse()], false).into_result().unwrap();
    let back = &restored[0].to;
    assert_ne!(back, &src);
    assert_eq!(back.parent(), src.parent());
    let name = back.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("x.") && name.ends_with(".txt"), "{name}");
    assert_eq!(fs::read_to_string(back).unwrap(), "old");
    assert_eq!(fs::read_to_string(&src).unwrap(), "new");
}

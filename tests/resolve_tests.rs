use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use to_trash::TrashError;
use to_trash::fs_ops::{expand_tilde, resolve_path, tilde_display};

/// Point HOME at `home` for the duration of `f`.
fn with_home<T>(home: &std::path::Path, f: impl FnOnce() -> T) -> T {
    let saved = env::var_os("HOME");
    unsafe {
        env::set_var("HOME", home);
    }
    let out = f();
    unsafe {
        match saved {
            Some(v) => env::set_var("HOME", v),
            None => env::remove_var("HOME"),
        }
    }
    out
}

#[test]
#[serial]
fn tilde_prefix_expands_to_home() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("notes.md"), b"x").unwrap();

    let resolved = with_home(td.path(), || resolve_path(std::path::Path::new("~/notes.md")).unwrap());
    assert_eq!(resolved.as_path(), td.path().join("notes.md"));
    assert_eq!(with_home(td.path(), || expand_tilde(std::path::Path::new("~"))), td.path());
}

#[test]
#[serial]
fn home_prefix_displays_as_tilde() {
    let td = tempdir().unwrap();
    let shown = with_home(td.path(), || tilde_display(&td.path().join("x").join("y.txt")));
    assert!(shown.starts_with('~'), "{shown}");
    assert!(shown.ends_with("y.txt"), "{shown}");
}

#[test]
fn missing_path_is_not_found_with_input_path() {
    let td = tempdir().unwrap();
    let p = td.path().join("nope.txt");
    match resolve_path(&p) {
        Err(TrashError::NotFound(got)) => assert_eq!(got, p),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn dotdot_segments_are_removed() {
    let td = tempdir().unwrap();
    fs::create_dir_all(td.path().join("a")).unwrap();
    fs::write(td.path().join("b.txt"), b"x").unwrap();

    let resolved = resolve_path(&td.path().join("a").join("..").join("b.txt")).unwrap();
    assert_eq!(resolved.as_path(), td.path().join("b.txt"));
}

#[cfg(unix)]
#[test]
fn symlinks_are_not_followed() {
    let td = tempdir().unwrap();
    let target = td.path().join("target.txt");
    fs::write(&target, b"x").unwrap();
    let link = td.path().join("link.txt");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    assert_eq!(resolve_path(&link).unwrap().as_path(), link);

    let dangling = td.path().join("dangling");
    std::os::unix::fs::symlink(td.path().join("missing"), &dangling).unwrap();
    assert_eq!(resolve_path(&dangling).unwrap().into_path_buf(), PathBuf::from(&dangling));
}

use chrono::{FixedOffset, TimeZone};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

use to_trash::history::MoveRecord;
use to_trash::restore::{Effect, Phase, RestoreState, SessionEvent, map_key};

fn entries(n: u32) -> Vec<MoveRecord> {
    (0..n)
        .map(|i| {
            let at = FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 5, 1, 10, i, 0)
                .unwrap();
            MoveRecord::new(format!("/home/u/f{i}"), format!("/home/u/.myTrash/f{i}"), at)
        })
        .collect()
}

#[test]
fn toggling_twice_clears_the_mark() {
    let mut s = RestoreState::new(entries(3));
    s.handle(SessionEvent::Toggle);
    assert_eq!(s.selected().len(), 1);
    s.handle(SessionEvent::Toggle);
    assert!(s.selected().is_empty());
}

#[test]
fn navigation_clamps_and_leaves_selection_alone() {
    let mut s = RestoreState::new(entries(3));
    s.handle(SessionEvent::Toggle);
    s.handle(SessionEvent::Up);
    assert_eq!(s.cursor(), 0);
    for _ in 0..10 {
        s.handle(SessionEvent::Down);
    }
    assert_eq!(s.cursor(), 2);
    s.handle(SessionEvent::PageUp);
    assert_eq!(s.cursor(), 0);
    s.handle(SessionEvent::PageDown);
    assert_eq!(s.cursor(), 2);
    assert_eq!(s.selected().len(), 1);
}

#[test]
fn commit_with_empty_selection_stays_browsing() {
    let mut s = RestoreState::new(entries(2));
    assert_eq!(s.handle(SessionEvent::Commit), Effect::None);
    assert_eq!(s.phase(), Phase::Browsing);
    assert!(s.status().is_some());
}

#[test]
fn quit_never_restores() {
    let mut s = RestoreState::new(entries(2));
    s.handle(SessionEvent::Toggle);
    assert_eq!(s.handle(SessionEvent::Quit), Effect::Exit);
    assert_eq!(s.phase(), Phase::Exiting);
    // Exiting ignores everything, including a late commit.
    assert_eq!(s.handle(SessionEvent::Commit), Effect::None);
}

#[test]
fn commit_swaps_source_and_destination() {
    let mut s = RestoreState::new(entries(2));
    s.handle(SessionEvent::Bottom);
    s.handle(SessionEvent::Toggle);
    let Effect::Restore(reqs) = s.handle(SessionEvent::Commit) else {
        panic!("expected a restore effect");
    };
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].source, PathBuf::from("/home/u/.myTrash/f1"));
    assert_eq!(reqs[0].destination, PathBuf::from("/home/u/f1"));
}

#[test]
fn resize_keeps_selection_and_cursor() {
    let mut s = RestoreState::new(entries(3));
    s.handle(SessionEvent::Down);
    s.handle(SessionEvent::Toggle);
    s.handle(SessionEvent::Resize { width: 200 });
    assert_eq!(s.cursor(), 1);
    assert_eq!(s.selected().len(), 1);
    assert_eq!(s.columns().trash_path, 82);
}

#[test]
fn keys_drive_the_state_machine() {
    let mut s = RestoreState::new(entries(2));
    let keys = [
        KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE),
        KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE),
        KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT),
    ];
    let mut last = Effect::None;
    for k in &keys {
        if let Some(ev) = map_key(k) {
            last = s.handle(ev);
        }
    }
    assert!(matches!(last, Effect::Restore(ref r) if r.len() == 1));
}

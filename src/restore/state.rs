//! Restore session state machine.
//!
//! Pure: no terminal, no filesystem. `RestoreState::handle` takes one
//! `SessionEvent` and returns the `Effect` the caller must carry out.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::fs_ops::MoveRequest;
use crate::history::{MoveRecord, sort_by_removed_at};

pub const MARK_WIDTH: u16 = 4;
pub const REMOVED_AT_WIDTH: u16 = 20;
pub const MIN_PATH_WIDTH: u16 = 20;
/// Horizontal space taken by borders and padding around the table.
pub const TABLE_CHROME_WIDTH: u16 = 12;
const DEFAULT_PAGE_SIZE: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Browsing,
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
    Toggle,
    Commit,
    Quit,
    Resize { width: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Exit,
    Restore(Vec<MoveRequest>),
}

/// Widths of the four table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub mark: u16,
    pub trash_path: u16,
    pub orig_path: u16,
    pub removed_at: u16,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self {
            mark: MARK_WIDTH,
            trash_path: MIN_PATH_WIDTH,
            orig_path: MIN_PATH_WIDTH,
            removed_at: REMOVED_AT_WIDTH,
        }
    }
}

impl ColumnWidths {
    /// Split a terminal width: both path columns share what is left after the
    /// fixed columns, never narrower than `MIN_PATH_WIDTH`.
    pub fn for_terminal_width(width: u16) -> Self {
        let available = i32::from(width) - i32::from(TABLE_CHROME_WIDTH);
        let remaining = available - i32::from(MARK_WIDTH) - i32::from(REMOVED_AT_WIDTH);
        let path = (remaining / 2).max(i32::from(MIN_PATH_WIDTH));
        let path = u16::try_from(path).unwrap_or(u16::MAX);
        Self {
            trash_path: path,
            orig_path: path,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct RestoreState {
    entries: Vec<MoveRecord>,
    cursor: usize,
    selection: HashSet<PathBuf>,
    columns: ColumnWidths,
    page_size: usize,
    phase: Phase,
    status: Option<String>,
}

impl RestoreState {
    /// Entries are sorted oldest first.
    pub fn new(mut entries: Vec<MoveRecord>) -> Self {
        sort_by_removed_at(&mut entries);
        Self {
            entries,
            cursor: 0,
            selection: HashSet::new(),
            columns: ColumnWidths::default(),
            page_size: DEFAULT_PAGE_SIZE,
            phase: Phase::Browsing,
            status: None,
        }
    }

    pub fn entries(&self) -> &[MoveRecord] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn columns(&self) -> ColumnWidths {
        self.columns
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_marked(&self, entry: &MoveRecord) -> bool {
        self.selection.contains(&entry.to)
    }

    /// Marked entries in timestamp order.
    pub fn selected(&self) -> Vec<&MoveRecord> {
        self.entries.iter().filter(|e| self.is_marked(e)).collect()
    }

    /// Rows moved by PageUp/PageDown; the view sets it from the table height.
    pub fn set_page_size(&mut self, rows: usize) {
        self.page_size = rows.max(1);
    }

    pub fn handle(&mut self, event: SessionEvent) -> Effect {
        if self.phase == Phase::Exiting {
            return Effect::None;
        }
        let last = self.entries.len().saturating_sub(1);

        match event {
            SessionEvent::Up => self.cursor = self.cursor.saturating_sub(1),
            SessionEvent::Down => self.cursor = (self.cursor + 1).min(last),
            SessionEvent::PageUp => self.cursor = self.cursor.saturating_sub(self.page_size),
            SessionEvent::PageDown => self.cursor = (self.cursor + self.page_size).min(last),
            SessionEvent::Top => self.cursor = 0,
            SessionEvent::Bottom => self.cursor = last,
            SessionEvent::Toggle => self.toggle_current(),
            SessionEvent::Resize { width } => self.columns = ColumnWidths::for_terminal_width(width),
            SessionEvent::Quit => {
                self.phase = Phase::Exiting;
                return Effect::Exit;
            }
            SessionEvent::Commit => return self.commit(),
        }
        Effect::None
    }

    fn toggle_current(&mut self) {
        let Some(entry) = self.entries.get(self.cursor) else {
            return;
        };
        if !self.selection.remove(&entry.to) {
            self.selection.insert(entry.to.clone());
        }
        self.status = None;
    }

    fn commit(&mut self) -> Effect {
        if self.selection.is_empty() {
            self.status = Some("nothing marked; press space to mark a file".to_string());
            return Effect::None;
        }
        let requests = self.selected().into_iter().map(MoveRecord::inverse).collect();
        self.phase = Phase::Exiting;
        Effect::Restore(requests)
    }
}

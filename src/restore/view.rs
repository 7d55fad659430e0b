//! Restore screen rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Row, Table, TableState},
};

use crate::fs_ops::tilde_display;
use crate::history::MoveRecord;

use super::state::RestoreState;

const HELP: [&str; 4] = [
    "[Keys]",
    "  space / enter       : Toggle mark",
    "  X                   : Restore marked files",
    "  q / Ctrl+C / Ctrl+G : Quit",
];

const REMOVED_AT_DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

/// Styles for the restore screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreTheme {
    pub help: Style,
    pub border: Style,
    pub header: Style,
    pub highlight: Style,
    pub mark: Style,
    pub status: Style,
}

impl Default for RestoreTheme {
    fn default() -> Self {
        Self {
            help: Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Indexed(240)),
            header: Style::default().add_modifier(Modifier::BOLD),
            highlight: Style::default().fg(Color::Black).bg(Color::Cyan),
            mark: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            status: Style::default().fg(Color::Yellow),
        }
    }
}

impl RestoreTheme {
    /// No colors or modifiers, for terminals that should stay monochrome.
    pub fn plain() -> Self {
        Self {
            help: Style::default(),
            border: Style::default(),
            header: Style::default(),
            highlight: Style::default().add_modifier(Modifier::REVERSED),
            mark: Style::default(),
            status: Style::default(),
        }
    }
}

pub struct RestoreView {
    theme: RestoreTheme,
    table_state: TableState,
}

impl RestoreView {
    pub fn new(theme: RestoreTheme) -> Self {
        Self {
            theme,
            table_state: TableState::default(),
        }
    }

    pub fn theme(&self) -> &RestoreTheme {
        &self.theme
    }

    /// Draw the whole screen. Returns how many table rows fit, for paging.
    pub fn render(&mut self, frame: &mut Frame, state: &RestoreState) -> usize {
        let selected = state.selected();
        let selected_height = if selected.is_empty() {
            0
        } else {
            u16::try_from(selected.len() + 1).unwrap_or(u16::MAX)
        };

        let [help_area, table_area, selected_area, status_area] = Layout::vertical([
            Constraint::Length(HELP.len() as u16),
            Constraint::Min(4),
            Constraint::Length(selected_height),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_help(frame, help_area);
        self.render_table(frame, table_area, state);
        self.render_selected(frame, selected_area, &selected);
        if let Some(msg) = state.status() {
            frame.render_widget(Paragraph::new(Span::styled(msg, self.theme.status)), status_area);
        }

        // borders (2) + header (1)
        usize::from(table_area.height.saturating_sub(3))
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = HELP.iter().map(|l| Line::styled(*l, self.theme.help)).collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect, state: &RestoreState) {
        let cols = state.columns();
        let widths = [
            Constraint::Length(cols.mark),
            Constraint::Length(cols.trash_path),
            Constraint::Length(cols.orig_path),
            Constraint::Length(cols.removed_at),
        ];

        let header = Row::new(["Mark", "Path in Trash", "Path in Orig.", "Removed At"]).style(self.theme.header);
        let rows = state.entries().iter().map(|entry| {
            let mark = if state.is_marked(entry) { "x" } else { "" };
            Row::new([
                Span::styled(mark, self.theme.mark),
                Span::raw(tilde_display(&entry.to)),
                Span::raw(tilde_display(&entry.from)),
                Span::raw(entry.removed_at.format(REMOVED_AT_DISPLAY).to_string()),
            ])
        });

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::bordered().border_style(self.theme.border))
            .row_highlight_style(self.theme.highlight);

        self.table_state.select(if state.entries().is_empty() {
            None
        } else {
            Some(state.cursor())
        });
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_selected(&self, frame: &mut Frame, area: Rect, selected: &[&MoveRecord]) {
        if selected.is_empty() || area.height == 0 {
            return;
        }
        let mut lines = vec![Line::from("Selected files:")];
        lines.extend(selected.iter().enumerate().map(|(i, e)| {
            Line::from(format!(
                "{}. {} → {}",
                i + 1,
                tilde_display(&e.to),
                tilde_display(&e.from)
            ))
        }));
        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restore::state::SessionEvent;
    use chrono::{FixedOffset, TimeZone};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(state: &RestoreState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let mut view = RestoreView::new(RestoreTheme::plain());
        terminal.draw(|f| {
            view.render(f, state);
        })
        .unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn shows_headers_rows_and_marks() {
        let at = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 5, 1, 10, 20, 30).unwrap();
        let mut state = RestoreState::new(vec![MoveRecord::new("/srv/a.txt", "/srv/trash/a.txt", at)]);
        state.handle(SessionEvent::Resize { width: 100 });
        state.handle(SessionEvent::Toggle);

        let out = screen(&state);
        assert!(out.contains("Path in Trash"), "{out}");
        assert!(out.contains("/srv/trash/a.txt"), "{out}");
        assert!(out.contains("2024-05-01 10:20:30"), "{out}");
        assert!(out.contains("Selected files:"), "{out}");
    }
}

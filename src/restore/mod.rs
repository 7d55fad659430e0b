//! Interactive restore: pick trashed files from the ledger and move them back.

mod keys;
mod session;
mod state;
mod view;

pub use keys::{map_event, map_key};
pub use session::{CrosstermEvents, EventSource, run_session};
pub use state::{ColumnWidths, Effect, Phase, RestoreState, SessionEvent};
pub use view::{RestoreTheme, RestoreView};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::panic;
use std::path::Path;
use std::sync::Once;
use tracing::{debug, info};

use crate::errors::{Result, TrashError};
use crate::fs_ops::{BatchOutcome, move_batch};
use crate::history::History;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// How a restore invocation ended.
#[derive(Debug)]
pub enum RestoreOutcome {
    NothingToRestore,
    Cancelled,
    Restored(BatchOutcome),
}

/// Load and reconcile the ledger, let the user pick entries, move them back.
/// The ledger is left alone afterwards; the next load drops the restored entries.
pub fn run_restore(trash_dir: &Path, theme: RestoreTheme, dry_run: bool) -> Result<RestoreOutcome> {
    let mut history = History::load(trash_dir)?;
    let report = history.reconcile()?;
    debug!(removed = report.removed, rewritten = report.rewritten, "ledger reconciled before restore");

    if history.is_empty() {
        info!(trash_dir = %trash_dir.display(), "nothing to restore");
        return Ok(RestoreOutcome::NothingToRestore);
    }

    let mut state = RestoreState::new(history.sorted_records());
    let mut view = RestoreView::new(theme);

    install_panic_hook();
    let mut terminal = init_terminal()?;
    let result = run_session(&mut terminal, &mut state, &mut view, &mut CrosstermEvents);
    let restored = restore_terminal(&mut terminal);
    let effect = result?;
    restored?;

    match effect {
        Effect::Restore(requests) => Ok(RestoreOutcome::Restored(move_batch(&requests, dry_run))),
        Effect::Exit | Effect::None => Ok(RestoreOutcome::Cancelled),
    }
}

pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode().map_err(TrashError::Terminal)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(TrashError::Terminal)?;
    Terminal::new(CrosstermBackend::new(stdout)).map_err(TrashError::Terminal)
}

pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(TrashError::Terminal)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(TrashError::Terminal)?;
    terminal.show_cursor().map_err(TrashError::Terminal)
}

/// Leave raw mode and the alternate screen before the panic message prints.
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let original = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original(info);
        }));
    });
}

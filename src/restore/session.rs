use crossterm::event;
use ratatui::{Terminal, backend::Backend};
use std::io;
use std::time::Duration;
use tracing::{debug, trace};

use crate::errors::{Result, TrashError};
use crate::shutdown;

use super::keys::map_event;
use super::state::{Effect, Phase, RestoreState, SessionEvent};
use super::view::RestoreView;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Where session events come from. `Ok(None)` means nothing happened within
/// the poll interval.
pub trait EventSource {
    fn next_event(&mut self) -> io::Result<Option<SessionEvent>>;
}

/// Reads the real terminal through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<Option<SessionEvent>> {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(None);
        }
        Ok(map_event(&event::read()?))
    }
}

/// Draw, read one event, apply it; repeat until the state is exiting or a
/// shutdown was requested. Returns the last effect produced.
pub fn run_session<B, E>(
    terminal: &mut Terminal<B>,
    state: &mut RestoreState,
    view: &mut RestoreView,
    events: &mut E,
) -> Result<Effect>
where
    B: Backend,
    E: EventSource,
{
    let size = terminal.size().map_err(TrashError::Terminal)?;
    state.handle(SessionEvent::Resize { width: size.width });

    loop {
        let mut page = 0;
        terminal
            .draw(|frame| page = view.render(frame, state))
            .map_err(TrashError::Terminal)?;
        state.set_page_size(page);

        if shutdown::is_requested() {
            debug!("shutdown requested; leaving restore session");
            return Ok(Effect::Exit);
        }

        let Some(ev) = events.next_event().map_err(TrashError::Terminal)? else {
            continue;
        };
        trace!(?ev, "restore event");
        let effect = state.handle(ev);
        if state.phase() == Phase::Exiting {
            return Ok(effect);
        }
    }
}

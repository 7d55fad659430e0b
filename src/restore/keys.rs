use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::SessionEvent;

/// Translate a terminal event. Key releases and repeats are ignored.
pub fn map_event(event: &Event) -> Option<SessionEvent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Resize(width, _) => Some(SessionEvent::Resize { width: *width }),
        _ => None,
    }
}

pub fn map_key(key: &KeyEvent) -> Option<SessionEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('g') => Some(SessionEvent::Quit),
            KeyCode::Char('m') | KeyCode::Char('j') => Some(SessionEvent::Toggle),
            _ => None,
        };
    }

    let event = match key.code {
        KeyCode::Up | KeyCode::Char('k') => SessionEvent::Up,
        KeyCode::Down | KeyCode::Char('j') => SessionEvent::Down,
        KeyCode::PageUp => SessionEvent::PageUp,
        KeyCode::PageDown => SessionEvent::PageDown,
        KeyCode::Home | KeyCode::Char('g') => SessionEvent::Top,
        KeyCode::End | KeyCode::Char('G') => SessionEvent::Bottom,
        KeyCode::Char(' ') | KeyCode::Enter => SessionEvent::Toggle,
        KeyCode::Char('X') => SessionEvent::Commit,
        KeyCode::Char('q') | KeyCode::Esc => SessionEvent::Quit,
        _ => return None,
    };
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn control_chords() {
        assert_eq!(map_key(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(SessionEvent::Quit));
        assert_eq!(map_key(&press(KeyCode::Char('g'), KeyModifiers::CONTROL)), Some(SessionEvent::Quit));
        assert_eq!(map_key(&press(KeyCode::Char('j'), KeyModifiers::CONTROL)), Some(SessionEvent::Toggle));
        assert_eq!(map_key(&press(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn shifted_x_commits_and_lowercase_does_not() {
        assert_eq!(map_key(&press(KeyCode::Char('X'), KeyModifiers::SHIFT)), Some(SessionEvent::Commit));
        assert_eq!(map_key(&press(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(&release), None);
    }

    #[test]
    fn resize_carries_width() {
        assert_eq!(map_event(&Event::Resize(100, 40)), Some(SessionEvent::Resize { width: 100 }));
    }
}

//! Key mapping for the session loop
//!
//! Converts crossterm input events into session actions.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::cursor::Direction;

/// What the session loop should do with one input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the marker one cell
    Move(Direction),
    /// `q` / `Q`
    Quit,
    /// Ctrl+C arriving as a key event (raw mode swallows SIGINT)
    Interrupt,
    /// No state change
    Ignore,
}

/// Key mapper for converting input events to actions
pub struct KeyMapper;

impl KeyMapper {
    /// Map any input event. Only key events can produce an action.
    pub fn map_event(event: &Event) -> Action {
        match event {
            Event::Key(key) => Self::map(key),
            // Resize is deliberately ignored: bounds stay as sampled at startup
            _ => Action::Ignore,
        }
    }

    /// Map a crossterm KeyEvent
    pub fn map(event: &KeyEvent) -> Action {
        // Windows reports releases as separate events
        if event.kind == KeyEventKind::Release {
            return Action::Ignore;
        }

        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

        match event.code {
            KeyCode::Up => Action::Move(Direction::Up),
            KeyCode::Down => Action::Move(Direction::Down),
            KeyCode::Left => Action::Move(Direction::Left),
            KeyCode::Right => Action::Move(Direction::Right),

            KeyCode::Char('c') | KeyCode::Char('C') if ctrl => Action::Interrupt,
            KeyCode::Char('q') | KeyCode::Char('Q') if !ctrl => Action::Quit,

            _ => Action::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent, MouseEventKind};

    fn key_event(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn test_arrow_keys() {
        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ];
        for (code, dir) in cases {
            let event = key_event(code, KeyModifiers::NONE);
            assert_eq!(KeyMapper::map(&event), Action::Move(dir));
        }

        // Modifiers don't change the meaning of an arrow
        let event = key_event(KeyCode::Up, KeyModifiers::SHIFT);
        assert_eq!(KeyMapper::map(&event), Action::Move(Direction::Up));
    }

    #[test]
    fn test_quit_keys() {
        let event = key_event(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), Action::Quit);

        let event = key_event(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(KeyMapper::map(&event), Action::Quit);

        // Ctrl+Q is not a quit key
        let event = key_event(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(KeyMapper::map(&event), Action::Ignore);
    }

    #[test]
    fn test_ctrl_c_is_interrupt() {
        let event = key_event(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyMapper::map(&event), Action::Interrupt);

        // Plain 'c' is just another key
        let event = key_event(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), Action::Ignore);
    }

    #[test]
    fn test_other_keys_ignored() {
        for code in [KeyCode::Char('x'), KeyCode::Enter, KeyCode::Esc, KeyCode::F(1)] {
            let event = key_event(code, KeyModifiers::NONE);
            assert_eq!(KeyMapper::map(&event), Action::Ignore);
        }
    }

    #[test]
    fn test_release_ignored_repeat_kept() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(KeyMapper::map(&release), Action::Ignore);

        let repeat = KeyEvent {
            kind: KeyEventKind::Repeat,
            code: KeyCode::Left,
            ..release
        };
        assert_eq!(KeyMapper::map(&repeat), Action::Move(Direction::Left));
    }

    #[test]
    fn test_non_key_events_ignored() {
        assert_eq!(KeyMapper::map_event(&Event::Resize(10, 10)), Action::Ignore);
        assert_eq!(KeyMapper::map_event(&Event::FocusLost), Action::Ignore);

        let mouse = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(KeyMapper::map_event(&Event::Mouse(mouse)), Action::Ignore);

        let key = Event::Key(key_event(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(KeyMapper::map_event(&key), Action::Move(Direction::Down));
    }
}

use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;

/// Converts a crossterm event into an [`InputEvent`].
///
/// Key releases/repeats, resizes, and keys or buttons the select control has no use for map to
/// `None`; the caller redraws on resize itself.
pub fn input_event_from_crossterm(ev: crossterm::event::Event) -> Option<InputEvent> {
    match ev {
        crossterm::event::Event::Key(key) => {
            if key.kind != crossterm::event::KeyEventKind::Press {
                return None;
            }
            Some(InputEvent::Key(key_event_from_crossterm(key)?))
        }
        crossterm::event::Event::Mouse(m) => {
            Some(InputEvent::Mouse(mouse_event_from_crossterm(m)?))
        }
        crossterm::event::Event::FocusLost => Some(InputEvent::FocusLost),
        _ => None,
    }
}

pub fn key_event_from_crossterm(key: crossterm::event::KeyEvent) -> Option<KeyEvent> {
    let code = match key.code {
        crossterm::event::KeyCode::Char(c) => KeyCode::Char(c),
        crossterm::event::KeyCode::Enter => KeyCode::Enter,
        crossterm::event::KeyCode::Tab => KeyCode::Tab,
        crossterm::event::KeyCode::BackTab => KeyCode::BackTab,
        crossterm::event::KeyCode::Esc => KeyCode::Esc,
        crossterm::event::KeyCode::Up => KeyCode::Up,
        crossterm::event::KeyCode::Down => KeyCode::Down,
        _ => return None,
    };

    // crossterm reports BackTab with SHIFT set; the key code already carries the direction.
    let mut modifiers = modifiers_from_crossterm(key.modifiers);
    if code == KeyCode::BackTab {
        modifiers.shift = false;
    }

    Some(KeyEvent { code, modifiers })
}

pub fn mouse_event_from_crossterm(m: crossterm::event::MouseEvent) -> Option<MouseEvent> {
    let kind = match m.kind {
        crossterm::event::MouseEventKind::Down(b) => {
            MouseEventKind::Down(mouse_button_from_crossterm(b)?)
        }
        crossterm::event::MouseEventKind::Moved => MouseEventKind::Moved,
        crossterm::event::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        crossterm::event::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
        _ => return None,
    };

    Some(MouseEvent {
        x: m.column,
        y: m.row,
        kind,
        modifiers: modifiers_from_crossterm(m.modifiers),
    })
}

fn modifiers_from_crossterm(m: crossterm::event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: m.contains(crossterm::event::KeyModifiers::SHIFT),
        ctrl: m.contains(crossterm::event::KeyModifiers::CONTROL),
        alt: m.contains(crossterm::event::KeyModifiers::ALT),
    }
}

fn mouse_button_from_crossterm(b: crossterm::event::MouseButton) -> Option<MouseButton> {
    match b {
        crossterm::event::MouseButton::Left => Some(MouseButton::Left),
        crossterm::event::MouseButton::Right | crossterm::event::MouseButton::Middle => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_press_maps_to_char() {
        let ev = crossterm::event::Event::Key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char(' '),
            crossterm::event::KeyModifiers::NONE,
        ));
        assert_eq!(
            input_event_from_crossterm(ev),
            Some(InputEvent::Key(KeyEvent::new(KeyCode::Char(' '))))
        );
    }

    #[test]
    fn back_tab_drops_shift() {
        let key = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::BackTab,
            crossterm::event::KeyModifiers::SHIFT,
        );
        assert_eq!(
            key_event_from_crossterm(key),
            Some(KeyEvent::new(KeyCode::BackTab))
        );
    }

    #[test]
    fn mouse_moved_keeps_position() {
        let m = crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Moved,
            column: 4,
            row: 7,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        assert_eq!(mouse_event_from_crossterm(m), Some(MouseEvent::moved(4, 7)));
    }

    #[test]
    fn unused_keys_and_buttons_are_dropped() {
        let key = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::PageDown,
            crossterm::event::KeyModifiers::NONE,
        );
        assert_eq!(key_event_from_crossterm(key), None);

        let m = crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Right),
            column: 1,
            row: 1,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        assert_eq!(mouse_event_from_crossterm(m), None);
    }

    #[test]
    fn focus_lost_is_forwarded() {
        assert_eq!(
            input_event_from_crossterm(crossterm::event::Event::FocusLost),
            Some(InputEvent::FocusLost)
        );
    }
}

use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyEvent>,
    pub help_key: String,
    pub help_desc: String,
}

impl Binding {
    pub fn new(
        help_key: impl Into<String>,
        help_desc: impl Into<String>,
        keys: Vec<KeyEvent>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            help_desc: help_desc.into(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| key_event_matches(k, event))
    }
}

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    pattern.code == event.code && modifiers_match(pattern.modifiers, event.modifiers)
}

fn modifiers_match(pattern: KeyModifiers, event: KeyModifiers) -> bool {
    pattern.shift == event.shift && pattern.ctrl == event.ctrl && pattern.alt == event.alt
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers {
        shift: false,
        ctrl: true,
        alt: false,
    })
}

/// Key bindings understood by [`crate::select::SelectView`].
///
/// `toggle` opens a closed list and, on the press that closes it, confirms the highlighted
/// option. Opening and confirming share one binding on purpose; splitting them changes how the
/// control behaves for keyboard users.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectBindings {
    pub toggle: Binding,
    pub up: Binding,
    pub down: Binding,
    pub close: Binding,
}

impl Default for SelectBindings {
    fn default() -> Self {
        Self {
            toggle: Binding::new(
                "enter/space",
                "open/confirm",
                vec![key(KeyCode::Enter), key_char(' ')],
            ),
            up: Binding::new("↑", "up", vec![key(KeyCode::Up)]),
            down: Binding::new("↓", "down", vec![key(KeyCode::Down)]),
            close: Binding::new("esc", "close", vec![key(KeyCode::Esc)]),
        }
    }
}

impl SelectBindings {
    /// All bindings in display order, for help bars.
    pub fn to_vec(&self) -> Vec<Binding> {
        vec![
            self.toggle.clone(),
            self.up.clone(),
            self.down.clone(),
            self.close.clone(),
        ]
    }
}

//! Frontend-agnostic input events.
//!
//! The TUI translates crossterm's event stream into this enum so the view only
//! handles one event shape.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};

#[derive(Debug, Clone, PartialEq)]
pub enum FrontendEvent {
    /// Keyboard input
    Key {
        code: KeyCode,
        modifiers: KeyModifiers,
    },
    /// Mouse input
    Mouse {
        kind: MouseEventKind,
        x: u16,
        y: u16,
        modifiers: KeyModifiers,
    },
    /// Terminal resize
    Resize { width: u16, height: u16 },
    /// Bracketed paste
    Paste { text: String },
}

impl FrontendEvent {
    pub fn key(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::Key { code, modifiers }
    }

    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c), KeyModifiers::NONE)
    }

    pub fn click(x: u16, y: u16) -> Self {
        Self::Mouse {
            kind: MouseEventKind::Down(MouseButton::Left),
            x,
            y,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Key press rebuilt as a crossterm event (what tui-textarea consumes)
    pub fn as_key_event(&self) -> Option<KeyEvent> {
        match self {
            Self::Key { code, modifiers } => Some(KeyEvent::new(*code, *modifiers)),
            _ => None,
        }
    }

    /// Position of a left-button press
    pub fn left_click(&self) -> Option<(u16, u16)> {
        match self {
            Self::Mouse {
                kind: MouseEventKind::Down(MouseButton::Left),
                x,
                y,
                ..
            } => Some((*x, *y)),
            _ => None,
        }
    }
}

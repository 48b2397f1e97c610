//! Input vocabulary the host maps its native events onto.
//!
//! The host owns the real event loop (DOM, winit, ...) and translates
//! pointer/keyboard events into these types before dispatching them to the
//! controller. Focus state is passed explicitly (`input_focused`) instead
//! of being sniffed from the environment.

use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// The platform command modifier (Ctrl, or Meta on macOS).
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Keyboard keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Delete,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// A printable character, lowercased by the host.
    Character(char),
}

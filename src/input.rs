//! Keyboard input folded into paddle intent
//!
//! Events arrive whenever the platform delivers them; the tick only ever
//! sees the resulting `InputIntent`.

use serde::{Deserialize, Serialize};

/// A discrete key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    LeftPressed,
    LeftReleased,
    RightPressed,
    RightReleased,
}

impl InputEvent {
    /// Map a browser-style key name and press state to an event
    pub fn from_key(key: &str, pressed: bool) -> Option<Self> {
        match (key, pressed) {
            ("ArrowLeft", true) => Some(InputEvent::LeftPressed),
            ("ArrowLeft", false) => Some(InputEvent::LeftReleased),
            ("ArrowRight", true) => Some(InputEvent::RightPressed),
            ("ArrowRight", false) => Some(InputEvent::RightReleased),
            _ => None,
        }
    }
}

/// Directions currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntent {
    pub left: bool,
    pub right: bool,
}

impl InputIntent {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::LeftPressed => self.left = true,
            InputEvent::LeftReleased => self.left = false,
            InputEvent::RightPressed => self.right = true,
            InputEvent::RightReleased => self.right = false,
        }
    }

    /// -1, 0 or +1. Left wins when both are held.
    pub fn horizontal(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }
}

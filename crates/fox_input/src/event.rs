//! Raw input events

use serde::{Deserialize, Serialize};

/// Movement key, independent of layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
}

impl MoveKey {
    /// Map a WASD character (either case)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Self::Forward),
            's' => Some(Self::Back),
            'a' => Some(Self::Left),
            'd' => Some(Self::Right),
            _ => None,
        }
    }
}

/// Input event from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(MoveKey),
    KeyUp(MoveKey),
    /// Pointer pressed at screen position
    DragStart { x: f32, y: f32 },
    /// Pointer moved while pressed
    DragMove { x: f32, y: f32 },
    DragEnd,
    /// Device roll in degrees
    Tilt { gamma: f32 },
    TiltEnd,
    /// Window lost focus; release everything
    Blur,
}

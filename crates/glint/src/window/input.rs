//! Input state shared between a window and its objects.

use glint_render::{KeyAction, Modifiers};

/// Pointer position and button state.
///
/// On a [`Window`](super::Window) the position is in pixels with the origin
/// at the top-left corner. Bounding objects keep their own copy in local
/// coordinates, `[-1, 1]` across the object with +y up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub primary_down: bool,
    pub secondary_down: bool,
}

impl MouseState {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn with_primary(self, down: bool) -> Self {
        Self {
            primary_down: down,
            ..self
        }
    }

    pub fn with_secondary(self, down: bool) -> Self {
        Self {
            secondary_down: down,
            ..self
        }
    }
}

/// A key press, release or repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: u32,
    pub scancode: i32,
    pub action: KeyAction,
    pub modifiers: Modifiers,
}

/// Window size before and after a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEvent {
    pub old_width: u32,
    pub old_height: u32,
    pub width: u32,
    pub height: u32,
}

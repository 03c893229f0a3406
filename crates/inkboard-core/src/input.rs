//! Pointer and touch events delivered to the whiteboard.
//!
//! All positions are in screen space, relative to the canvas top-left.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// The button that draws.
    pub fn is_primary(self) -> bool {
        self == MouseButton::Left
    }
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
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl or Shift turns a primary press into a pan.
    pub fn requests_pan(&self) -> bool {
        self.ctrl || self.shift
    }
}

/// Pointer event type for mouse input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    /// The pointer left the canvas.
    Leave,
    Wheel {
        position: Point,
        delta: Vec2,
    },
    ContextMenu,
}

impl PointerEvent {
    /// Primary-button press without modifiers.
    pub fn down(position: Point) -> Self {
        PointerEvent::Down {
            position,
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn moved(position: Point) -> Self {
        PointerEvent::Move { position }
    }

    /// Primary-button release.
    pub fn up(position: Point) -> Self {
        PointerEvent::Up {
            position,
            button: MouseButton::Left,
        }
    }
}

/// Single-finger touch input. Only the first touch point is considered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TouchEvent {
    Start { position: Point },
    Move { position: Point },
    End,
}

impl TouchEvent {
    /// The equivalent primary-button pointer event. `last` is the most
    /// recent touch position, used for the release.
    pub fn to_pointer(self, last: Point) -> PointerEvent {
        match self {
            TouchEvent::Start { position } => PointerEvent::down(position),
            TouchEvent::Move { position } => PointerEvent::moved(position),
            TouchEvent::End => PointerEvent::up(last),
        }
    }
}

//! Input events consumed by the scroll core
//!
//! The host translates its platform events into these before handing them
//! over. Touch input arrives one pointer at a time; keyboard input carries a
//! platform-agnostic key code plus modifier flags.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

// ============================================================================
// Pointer events
// ============================================================================

/// Identifier of a touch pointer (finger) as assigned by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointerId(pub u32);

impl std::fmt::Display for PointerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What happened to a pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerAction {
    /// A finger touched down (first or additional)
    Down,
    /// A tracked finger moved
    Move,
    /// A tracked finger lifted
    Up,
    /// The whole gesture was cancelled by the host (e.g. a system gesture)
    Cancel,
}

/// A single pointer sample in viewport coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub pointer: PointerId,
    pub x: f32,
    pub y: f32,
    /// Event time in milliseconds on the host's monotonic clock
    pub timestamp_ms: i64,
}

impl PointerEvent {
    pub fn new(action: PointerAction, pointer: PointerId, x: f32, y: f32, timestamp_ms: i64) -> Self {
        Self {
            action,
            pointer,
            x,
            y,
            timestamp_ms,
        }
    }

    pub fn down(pointer: u32, x: f32, y: f32, timestamp_ms: i64) -> Self {
        Self::new(PointerAction::Down, PointerId(pointer), x, y, timestamp_ms)
    }

    pub fn moved(pointer: u32, x: f32, y: f32, timestamp_ms: i64) -> Self {
        Self::new(PointerAction::Move, PointerId(pointer), x, y, timestamp_ms)
    }

    pub fn up(pointer: u32, x: f32, y: f32, timestamp_ms: i64) -> Self {
        Self::new(PointerAction::Up, PointerId(pointer), x, y, timestamp_ms)
    }

    pub fn cancel(timestamp_ms: i64) -> Self {
        Self::new(PointerAction::Cancel, PointerId(0), 0.0, 0.0, timestamp_ms)
    }

    /// Position truncated to whole pixels
    pub fn position(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

// ============================================================================
// Keyboard events
// ============================================================================

/// Virtual key codes (platform-agnostic)
///
/// Only the keys the scroll core reacts to are named; hosts pass anything
/// else through as its raw code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const SPACE: KeyCode = KeyCode(0x20);

    // Arrow keys / D-pad
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);

    // Navigation keys
    pub const HOME: KeyCode = KeyCode(0x24);
    pub const END: KeyCode = KeyCode(0x23);
    pub const PAGE_UP: KeyCode = KeyCode(0x21);
    pub const PAGE_DOWN: KeyCode = KeyCode(0x22);

    pub const UNKNOWN: KeyCode = KeyCode(0);
}

/// Keyboard modifier flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { bits: 0 };
    pub const SHIFT: u8 = 0b0001;
    pub const CTRL: u8 = 0b0010;
    pub const ALT: u8 = 0b0100;
    pub const META: u8 = 0b1000;

    pub const fn new(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0;
        if shift {
            bits |= Self::SHIFT;
        }
        if ctrl {
            bits |= Self::CTRL;
        }
        if alt {
            bits |= Self::ALT;
        }
        if meta {
            bits |= Self::META;
        }
        Self { bits }
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self { bits }
    }

    pub const fn shift(&self) -> bool {
        self.bits & Self::SHIFT != 0
    }

    pub const fn ctrl(&self) -> bool {
        self.bits & Self::CTRL != 0
    }

    pub const fn alt(&self) -> bool {
        self.bits & Self::ALT != 0
    }

    pub const fn meta(&self) -> bool {
        self.bits & Self::META != 0
    }
}

/// Key press or release
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Down,
    Up,
}

/// A keyboard or D-pad event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub key: KeyCode,
    pub modifiers: Modifiers,
    /// Whether this is an auto-repeat
    pub repeat: bool,
}

impl KeyEvent {
    pub fn down(key: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            action: KeyAction::Down,
            key,
            modifiers,
            repeat: false,
        }
    }

    pub fn up(key: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            action: KeyAction::Up,
            key,
            modifiers,
            repeat: false,
        }
    }
}

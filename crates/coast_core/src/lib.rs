//! Coast Core
//!
//! Shared vocabulary for the coast scroll engine: integer geometry, input
//! events, configuration and error types. Nothing in here owns state; the
//! animation and gesture crates build on these types.
//!
//! # Coordinate model
//!
//! A scroll container shows a window of a single child. The scroll offset is
//! the top-left corner of that window in the child's coordinate space and is
//! kept inside `[0, scroll_range]` on each axis except while overscrolling.

pub mod config;
pub mod easing;
pub mod error;
pub mod events;
pub mod geometry;

pub use config::{ConfigError, OverScrollMode, ScrollConfig};
pub use easing::Easing;
pub use error::{Result, ScrollError};
pub use events::{KeyAction, KeyCode, KeyEvent, Modifiers, PointerAction, PointerEvent, PointerId};
pub use geometry::{
    Axis, ContentExtent, Direction, Edge, Insets, Point, Rect, ScrollGeometry, ScrollOffset, Size, Span,
    ViewportExtent,
};

/// Largest arrow-key jump as a fraction of the viewport dimension
pub const MAX_SCROLL_FACTOR: f32 = 0.5;

/// Minimum gap in milliseconds between two animated smooth scrolls
///
/// A smooth scroll requested sooner than this after the previous one jumps
/// straight to its target.
pub const ANIMATED_SCROLL_GAP_MS: i64 = 250;

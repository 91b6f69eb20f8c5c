//! Geometry primitives
//!
//! Everything here is expressed in integer pixels. The content coordinate
//! space has its origin at the top-left corner of the single scrolled child;
//! the scroll offset is the position of the visible window inside it.

use serde::{Deserialize, Serialize};

// ============================================================================
// Axes and directions
// ============================================================================

/// A scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// The perpendicular axis
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// A directional scroll or focus movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    /// True for movements toward the content origin (up or left)
    pub fn is_backward(self) -> bool {
        matches!(self, Direction::Up | Direction::Left)
    }

    /// Sign of the scroll delta produced by moving in this direction
    pub fn sign(self) -> i32 {
        if self.is_backward() {
            -1
        } else {
            1
        }
    }
}

/// One of the four viewport edges, used for edge-glow bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// The leading (`min`) and trailing (`max`) edge of an axis
    pub fn of(axis: Axis, trailing: bool) -> Edge {
        match (axis, trailing) {
            (Axis::Vertical, false) => Edge::Top,
            (Axis::Vertical, true) => Edge::Bottom,
            (Axis::Horizontal, false) => Edge::Left,
            (Axis::Horizontal, true) => Edge::Right,
        }
    }

    pub fn opposite(self) -> Edge {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// Points, sizes and rectangles
// ============================================================================

/// An integer point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// An integer size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Padding around the viewport's visible frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub const ZERO: Insets = Insets::uniform(0);

    pub const fn uniform(value: i32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// Sum of the padding along an axis
    pub fn total(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.left + self.right,
            Axis::Vertical => self.top + self.bottom,
        }
    }

    /// Padding before the content along an axis (left or top)
    pub fn leading(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }
}

/// An axis-aligned rectangle with exclusive right/bottom edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// The `(start, end)` span of the rect along an axis
    pub fn span(&self, axis: Axis) -> Span {
        match axis {
            Axis::Horizontal => Span::new(self.left, self.right),
            Axis::Vertical => Span::new(self.top, self.bottom),
        }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

/// A one-dimensional `[start, end)` interval along an axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: i32,
    pub end: i32,
}

impl Span {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> i32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True if the two spans share at least one pixel
    pub fn overlaps(&self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True if `other` lies strictly inside this span
    pub fn strictly_contains(&self, other: Span) -> bool {
        self.start < other.start && other.end < self.end
    }
}

// ============================================================================
// Scroll state geometry
// ============================================================================

/// Displacement of the visible window into the content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: i32,
    pub y: i32,
}

impl ScrollOffset {
    pub const ZERO: ScrollOffset = ScrollOffset { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    pub fn set(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
    }
}

/// Size of the single scrolled child
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentExtent {
    pub width: i32,
    pub height: i32,
}

impl ContentExtent {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// A zero-sized child is treated as no child at all
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Size and padding of the visible frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewportExtent {
    pub width: i32,
    pub height: i32,
    pub padding: Insets,
}

impl ViewportExtent {
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            padding: Insets::ZERO,
        }
    }

    pub const fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Outer size along an axis, padding included
    pub fn outer(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Size available to content along an axis, padding excluded
    pub fn inner(&self, axis: Axis) -> i32 {
        (self.outer(axis) - self.padding.total(axis)).max(0)
    }

    pub fn inner_width(&self) -> i32 {
        self.inner(Axis::Horizontal)
    }

    pub fn inner_height(&self) -> i32 {
        self.inner(Axis::Vertical)
    }
}

/// Viewport and content extents, supplied fresh by the host on every call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScrollGeometry {
    pub viewport: ViewportExtent,
    pub content: ContentExtent,
}

impl ScrollGeometry {
    pub const fn new(viewport: ViewportExtent, content: ContentExtent) -> Self {
        Self { viewport, content }
    }

    /// Maximum scroll offset along an axis: `max(0, content - viewport_inner)`
    pub fn scroll_range(&self, axis: Axis) -> i32 {
        if self.content.is_empty() {
            return 0;
        }
        (self.content.get(axis) - self.viewport.inner(axis)).max(0)
    }

    pub fn max_scroll_x(&self) -> i32 {
        self.scroll_range(Axis::Horizontal)
    }

    pub fn max_scroll_y(&self) -> i32 {
        self.scroll_range(Axis::Vertical)
    }

    /// True if the content overflows the viewport on either axis
    pub fn can_scroll(&self) -> bool {
        self.max_scroll_x() > 0 || self.max_scroll_y() > 0
    }

    /// Largest single arrow-key jump along an axis: half the viewport
    pub fn max_scroll_amount(&self, axis: Axis) -> i32 {
        (crate::MAX_SCROLL_FACTOR * self.viewport.outer(axis) as f32) as i32
    }

    /// Clamp an offset into `[0, max]` on both axes
    pub fn clamp(&self, offset: ScrollOffset) -> ScrollOffset {
        ScrollOffset::new(
            offset.x.clamp(0, self.max_scroll_x()),
            offset.y.clamp(0, self.max_scroll_y()),
        )
    }

    /// True if the offset lies inside `[0, max]` on both axes
    pub fn in_bounds(&self, offset: ScrollOffset) -> bool {
        self.clamp(offset) == offset
    }

    /// Whether a point in viewport coordinates lands on the scrolled child
    pub fn child_contains(&self, point: Point, offset: ScrollOffset) -> bool {
        if self.content.is_empty() {
            return false;
        }
        let left = self.viewport.padding.left - offset.x;
        let top = self.viewport.padding.top - offset.y;
        Rect::from_xywh(left, top, self.content.width, self.content.height).contains(point)
    }
}

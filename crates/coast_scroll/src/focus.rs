//! Focus and reveal planning
//!
//! Pure geometry for keyboard scrolling: how far to scroll to bring a
//! rectangle into view, which span of content a page/home/end/arrow press
//! targets, and which focusable candidate inside a span should take focus.
//!
//! All rectangles are in content coordinates (origin at the child's top-left
//! corner). The visible window on an axis is
//! `[offset, offset + viewport_inner)`.

use coast_core::{Axis, Direction, Rect, ScrollGeometry, ScrollOffset, Span};

/// Margins kept clear near the viewport edges when revealing a rect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FadingEdges {
    pub horizontal: i32,
    pub vertical: i32,
}

impl FadingEdges {
    pub const NONE: FadingEdges = FadingEdges {
        horizontal: 0,
        vertical: 0,
    };

    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

/// The currently visible span of content along an axis
pub fn visible_span(axis: Axis, offset: ScrollOffset, geometry: &ScrollGeometry) -> Span {
    let start = offset.get(axis);
    Span::new(start, start + geometry.viewport.inner(axis))
}

// ============================================================================
// Reveal
// ============================================================================

/// Scroll delta along one axis that brings `rect` on screen
///
/// If the rect is larger than the viewport only its first screenful is
/// brought in. The delta never moves the offset outside `[0, scroll_range]`.
pub fn reveal_delta_on_axis(
    rect: Rect,
    axis: Axis,
    offset: ScrollOffset,
    geometry: &ScrollGeometry,
    fading_edge: i32,
) -> i32 {
    if geometry.content.is_empty() {
        return 0;
    }

    let span = rect.span(axis);
    let size = geometry.viewport.inner(axis);
    let content_end = geometry.content.get(axis);
    let scroll = offset.get(axis);

    let mut screen_start = scroll;
    let mut screen_end = scroll + size;
    // Leave room for the fading edge unless the rect touches the content edge
    if span.start > 0 {
        screen_start += fading_edge;
    }
    if span.end < content_end {
        screen_end -= fading_edge;
    }

    let mut delta = 0;
    if span.end > screen_end && span.start > screen_start {
        delta = if span.len() > size {
            span.start - screen_start
        } else {
            span.end - screen_end
        };
        delta = delta.min(content_end - screen_end);
    } else if span.start < screen_start && span.end < screen_end {
        delta = if span.len() > size {
            -(screen_end - span.end)
        } else {
            -(screen_start - span.start)
        };
        delta = delta.max(-scroll);
    }

    let range = geometry.scroll_range(axis);
    (scroll + delta).clamp(0, range) - scroll
}

/// Scroll deltas `(dx, dy)` that bring `rect` on screen
pub fn scroll_delta_to_reveal(
    rect: Rect,
    offset: ScrollOffset,
    geometry: &ScrollGeometry,
    fading: FadingEdges,
) -> (i32, i32) {
    (
        reveal_delta_on_axis(rect, Axis::Horizontal, offset, geometry, fading.horizontal),
        reveal_delta_on_axis(rect, Axis::Vertical, offset, geometry, fading.vertical),
    )
}

/// Whether `rect` is on screen or within `delta` pixels of it along `axis`,
/// for a viewport of `viewport_size`
pub fn is_within_delta_of_screen(
    rect: Rect,
    axis: Axis,
    delta: i32,
    offset: ScrollOffset,
    viewport_size: i32,
) -> bool {
    let span = rect.span(axis);
    let scroll = offset.get(axis);
    span.end + delta >= scroll && span.start - delta <= scroll + viewport_size
}

/// Whether any part of `rect` is visible on both axes
pub fn is_on_screen(rect: Rect, offset: ScrollOffset, geometry: &ScrollGeometry) -> bool {
    Axis::BOTH.iter().all(|&axis| {
        is_within_delta_of_screen(rect, axis, 0, offset, geometry.viewport.inner(axis))
    })
}

// ============================================================================
// Keyboard targets
// ============================================================================

/// Content span targeted by a page-up/down (or left/right) press
pub fn page_span(direction: Direction, offset: ScrollOffset, geometry: &ScrollGeometry) -> Span {
    let axis = direction.axis();
    let size = geometry.viewport.inner(axis);
    let scroll = offset.get(axis);

    let start = if direction.is_backward() {
        (scroll - size).max(0)
    } else {
        let content_end = geometry.content.get(axis);
        let start = scroll + size;
        if start + size > content_end {
            (content_end - size).max(0)
        } else {
            start
        }
    };
    Span::new(start, start + size)
}

/// Content span targeted by a home/end press
pub fn full_span(direction: Direction, geometry: &ScrollGeometry) -> Span {
    let axis = direction.axis();
    let size = geometry.viewport.inner(axis);
    if direction.is_backward() {
        Span::new(0, size)
    } else {
        let start = (geometry.content.get(axis) - size).max(0);
        Span::new(start, start + size)
    }
}

/// Signed scroll delta for an arrow press with no focus target in reach
///
/// At most `max_scroll_amount` (half the viewport), limited by the content
/// left in that direction. Zero means there is nowhere to go.
pub fn arrow_jump(direction: Direction, offset: ScrollOffset, geometry: &ScrollGeometry) -> i32 {
    let axis = direction.axis();
    let max_jump = geometry.max_scroll_amount(axis);
    let scroll = offset.get(axis);

    let jump = if direction.is_backward() {
        max_jump.min(scroll)
    } else {
        let remaining = geometry.content.get(axis) - (scroll + geometry.viewport.inner(axis));
        max_jump.min(remaining)
    };
    jump.max(0) * direction.sign()
}

/// Scroll delta that makes `span` visible, or `None` if it already is
pub fn scroll_delta_for_span(
    direction: Direction,
    span: Span,
    offset: ScrollOffset,
    geometry: &ScrollGeometry,
) -> Option<i32> {
    let visible = visible_span(direction.axis(), offset, geometry);
    if span.start >= visible.start && span.end <= visible.end {
        return None;
    }
    Some(if direction.is_backward() {
        span.start - visible.start
    } else {
        span.end - visible.end
    })
}

// ============================================================================
// Focus candidates
// ============================================================================

/// A focusable item the host knows about, keyed by its own identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusCandidate<K> {
    pub key: K,
    /// Bounds in content coordinates
    pub rect: Rect,
}

impl<K> FocusCandidate<K> {
    pub fn new(key: K, rect: Rect) -> Self {
        Self { key, rect }
    }
}

/// Pick the candidate that should take focus inside `bounds`
///
/// Candidates overlapping `bounds` along the direction's axis compete. One
/// strictly inside the bounds beats one that only overlaps; among equals the
/// one closer to the leading edge wins (smallest start when moving backward,
/// largest end when moving forward). Earlier candidates win exact ties.
pub fn find_focusable_in_bounds<K>(
    candidates: &[FocusCandidate<K>],
    direction: Direction,
    bounds: Span,
) -> Option<&FocusCandidate<K>> {
    let axis = direction.axis();
    let backward = direction.is_backward();

    let mut best: Option<&FocusCandidate<K>> = None;
    let mut best_fully_contained = false;

    for candidate in candidates {
        let span = candidate.rect.span(axis);
        if !bounds.overlaps(span) {
            continue;
        }
        let fully_contained = bounds.strictly_contains(span);

        let Some(current) = best else {
            best = Some(candidate);
            best_fully_contained = fully_contained;
            continue;
        };

        let current_span = current.rect.span(axis);
        let closer = if backward {
            span.start < current_span.start
        } else {
            span.end > current_span.end
        };

        if best_fully_contained {
            if fully_contained && closer {
                best = Some(candidate);
            }
        } else if fully_contained {
            best = Some(candidate);
            best_fully_contained = true;
        } else if closer {
            best = Some(candidate);
        }
    }

    best
}

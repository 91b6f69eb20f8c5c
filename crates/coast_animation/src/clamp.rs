//! Overscroll clamping
//!
//! Pure functions that limit a requested scroll delta to a legal range and
//! report which boundary stopped it. Callers widen the range by the
//! overscroll distance when overscroll is allowed.

use coast_core::ScrollOffset;

/// Result of clamping one axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxisClamp {
    /// The delta that can actually be applied
    pub delta: i32,
    /// `current + requested` fell below `min`
    pub hit_min: bool,
    /// `current + requested` rose above `max`
    pub hit_max: bool,
}

impl AxisClamp {
    pub fn clamped(&self) -> bool {
        self.hit_min || self.hit_max
    }
}

/// Stateless clamp for scroll deltas
#[derive(Clone, Copy, Debug, Default)]
pub struct OverscrollClamp;

impl OverscrollClamp {
    /// Limit `delta` so that `current + delta` stays inside `[min, max]`
    ///
    /// If `current` already lies outside the range the result moves it onto
    /// the nearest bound. With `min > max` the range collapses to `min`.
    pub fn clamp(delta: i32, min: i32, max: i32, current: i32) -> AxisClamp {
        let max = max.max(min);
        let requested = current.saturating_add(delta);
        if requested < min {
            AxisClamp {
                delta: min - current,
                hit_min: true,
                hit_max: false,
            }
        } else if requested > max {
            AxisClamp {
                delta: max - current,
                hit_min: false,
                hit_max: true,
            }
        } else {
            AxisClamp {
                delta,
                hit_min: false,
                hit_max: false,
            }
        }
    }

    /// Apply a two-axis delta to `offset`, allowing each axis to run `over`
    /// pixels past `[0, range]`
    ///
    /// Returns the new offset and whether either axis was clamped.
    pub fn over_scroll_by(
        offset: ScrollOffset,
        delta_x: i32,
        delta_y: i32,
        range_x: i32,
        range_y: i32,
        over_x: i32,
        over_y: i32,
    ) -> OverScrollResult {
        let x = Self::clamp(delta_x, -over_x, range_x + over_x, offset.x);
        let y = Self::clamp(delta_y, -over_y, range_y + over_y, offset.y);
        OverScrollResult {
            offset: ScrollOffset::new(offset.x + x.delta, offset.y + y.delta),
            x,
            y,
        }
    }
}

/// Outcome of [`OverscrollClamp::over_scroll_by`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverScrollResult {
    pub offset: ScrollOffset,
    pub x: AxisClamp,
    pub y: AxisClamp,
}

impl OverScrollResult {
    pub fn clamped_x(&self) -> bool {
        self.x.clamped()
    }

    pub fn clamped_y(&self) -> bool {
        self.y.clamped()
    }

    pub fn clamped(&self) -> bool {
        self.clamped_x() || self.clamped_y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_range_is_untouched() {
        let result = OverscrollClamp::clamp(30, 0, 100, 50);
        assert_eq!(result, AxisClamp { delta: 30, hit_min: false, hit_max: false });
    }

    #[test]
    fn test_hits_min() {
        let result = OverscrollClamp::clamp(-80, 0, 100, 50);
        assert_eq!(result.delta, -50);
        assert!(result.hit_min);
        assert!(!result.hit_max);
    }

    #[test]
    fn test_hits_max() {
        let result = OverscrollClamp::clamp(80, 0, 100, 50);
        assert_eq!(result.delta, 50);
        assert!(result.hit_max);
    }

    #[test]
    fn test_landing_exactly_on_bound_is_not_a_hit() {
        let result = OverscrollClamp::clamp(50, 0, 100, 50);
        assert!(!result.clamped());
        assert_eq!(result.delta, 50);
    }

    #[test]
    fn test_result_always_in_range() {
        for current in [-20, 0, 37, 100, 140] {
            for delta in [-500, -51, -1, 0, 1, 63, 500] {
                let result = OverscrollClamp::clamp(delta, 0, 100, current);
                let landed = current + result.delta;
                assert!((0..=100).contains(&landed), "{current} + {delta} -> {landed}");
            }
        }
    }

    #[test]
    fn test_equal_bounds() {
        let result = OverscrollClamp::clamp(10, 0, 0, 0);
        assert_eq!(result.delta, 0);
        assert!(result.hit_max);
    }

    #[test]
    fn test_over_scroll_by_allows_overscroll_distance() {
        let result = OverscrollClamp::over_scroll_by(ScrollOffset::new(0, 5), 0, -50, 0, 200, 0, 20);
        assert_eq!(result.offset, ScrollOffset::new(0, -20));
        assert!(result.clamped_y());
        assert!(!result.clamped_x());
    }
}

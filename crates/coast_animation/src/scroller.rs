//! Scroll physics
//!
//! [`Scroller`] produces time-parameterized scroll trajectories: decelerating
//! flings, fixed-duration eased scrolls, and spring-backs into bounds. Each
//! axis runs its own small state machine:
//!
//! - `Spline`: the fling deceleration curve
//! - `Ballistic`: constant deceleration past an edge, bounded by the overfling
//!   distance
//! - `Cubic`: eased return from an overshoot to the edge
//! - `Eased`: fixed-duration programmatic scroll
//!
//! All time is passed in explicitly as milliseconds on the host's monotonic
//! clock, so identical inputs always produce identical trajectories.

use coast_core::{Axis, Easing, ScrollConfig, ScrollOffset};
use tracing::{debug, trace, warn};

use crate::spline::{self, FlingSpline, GRAVITY};

// ============================================================================
// Bounds and trajectories
// ============================================================================

/// Legal scroll range on both axes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl ScrollBounds {
    /// `[0, max_x] x [0, max_y]`
    pub const fn new(max_x: i32, max_y: i32) -> Self {
        Self {
            min_x: 0,
            max_x,
            min_y: 0,
            max_y,
        }
    }

    pub fn contains(&self, offset: ScrollOffset) -> bool {
        (self.min_x..=self.max_x).contains(&offset.x) && (self.min_y..=self.max_y).contains(&offset.y)
    }
}

/// What started the current trajectory
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrajectoryKind {
    Fling,
    SpringBack,
    Scroll,
}

/// Description of the trajectory a [`Scroller`] is running
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trajectory {
    pub kind: TrajectoryKind,
    pub start: ScrollOffset,
    /// Resting point as planned when the trajectory started
    pub target: ScrollOffset,
    /// Initial velocity in px/s, zero for eased scrolls
    pub velocity: (f32, f32),
    pub start_time_ms: i64,
    /// Fixed duration, or `None` for velocity-driven flings
    pub duration_ms: Option<i64>,
}

// ============================================================================
// Per-axis physics
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AxisMode {
    Spline,
    Ballistic,
    Cubic,
    Eased,
}

fn deceleration_for(velocity: f32) -> f32 {
    if velocity > 0.0 {
        -GRAVITY
    } else {
        GRAVITY
    }
}

#[derive(Clone, Debug)]
struct AxisScroller {
    start: i32,
    current: i32,
    final_pos: i32,
    /// Initial velocity of the current segment (px/s)
    velocity: f32,
    curr_velocity: f32,
    deceleration: f32,
    start_time: i64,
    duration: i64,
    spline_duration: i64,
    spline_distance: i32,
    finished: bool,
    over: i32,
    mode: AxisMode,
}

impl Default for AxisScroller {
    fn default() -> Self {
        Self {
            start: 0,
            current: 0,
            final_pos: 0,
            velocity: 0.0,
            curr_velocity: 0.0,
            deceleration: 0.0,
            start_time: 0,
            duration: 0,
            spline_duration: 0,
            spline_distance: 0,
            finished: true,
            over: 0,
            mode: AxisMode::Spline,
        }
    }
}

impl AxisScroller {
    fn update_scroll(&mut self, q: f32) {
        self.current = self.start + (q * (self.final_pos - self.start) as f32).round() as i32;
    }

    fn start_scroll(&mut self, start: i32, distance: i32, duration: i64, now: i64) {
        self.mode = AxisMode::Eased;
        self.finished = false;
        self.start = start;
        self.current = start;
        self.final_pos = start + distance;
        self.start_time = now;
        self.duration = duration;
        self.deceleration = 0.0;
        self.velocity = 0.0;
        self.curr_velocity = 0.0;
    }

    fn finish(&mut self) {
        self.current = self.final_pos;
        self.curr_velocity = 0.0;
        self.finished = true;
    }

    /// Stop where the axis is now
    fn stop(&mut self) {
        self.final_pos = self.current;
        self.curr_velocity = 0.0;
        self.finished = true;
    }

    /// Returns true if a spring-back was started
    fn springback(&mut self, start: i32, min: i32, max: i32, now: i64) -> bool {
        self.finished = true;
        self.start = start;
        self.current = start;
        self.final_pos = start;
        self.velocity = 0.0;
        self.curr_velocity = 0.0;
        self.start_time = now;
        self.duration = 0;

        if start < min {
            self.start_springback(start, min);
        } else if start > max {
            self.start_springback(start, max);
        }
        !self.finished
    }

    fn start_springback(&mut self, start: i32, end: i32) {
        self.mode = AxisMode::Cubic;
        self.start = start;
        self.current = start;
        self.final_pos = end;
        let delta = start - end;
        if delta == 0 {
            self.finished = true;
            self.duration = 0;
            return;
        }
        self.finished = false;
        self.deceleration = deceleration_for(delta as f32);
        // Only the sign is used by the cubic segment
        self.velocity = -delta as f32;
        self.over = delta.abs();
        self.duration = (1000.0 * (-2.0 * delta as f64 / self.deceleration as f64).sqrt()) as i64;
    }

    fn fling(&mut self, start: i32, velocity: f32, min: i32, max: i32, over: i32, now: i64, spline: &FlingSpline) {
        self.over = over;
        self.finished = false;
        self.velocity = velocity;
        self.curr_velocity = velocity;
        self.duration = 0;
        self.spline_duration = 0;
        self.start_time = now;
        self.start = start;
        self.current = start;

        if start > max || start < min {
            self.start_after_edge(start, min, max, velocity, now, spline);
            return;
        }

        self.mode = AxisMode::Spline;
        let mut total_distance = 0.0;
        if velocity != 0.0 {
            self.spline_duration = spline.duration_ms(velocity);
            self.duration = self.spline_duration;
            total_distance = spline.distance(velocity);
        }

        self.spline_distance = (total_distance * velocity.signum() as f64) as i32;
        self.final_pos = start + self.spline_distance;

        if self.final_pos < min {
            self.adjust_duration(self.start, self.final_pos, min);
            self.final_pos = min;
        }
        if self.final_pos > max {
            self.adjust_duration(self.start, self.final_pos, max);
            self.final_pos = max;
        }
    }

    /// Shorten the spline so it ends when `new_final` is reached
    fn adjust_duration(&mut self, start: i32, old_final: i32, new_final: i32) {
        let old_distance = old_final - start;
        if old_distance == 0 {
            return;
        }
        let new_distance = new_final - start;
        let x = (new_distance as f32 / old_distance as f32).abs();
        self.duration = (self.duration as f32 * spline::time_fraction(x)) as i64;
    }

    fn fit_on_bounce_curve(&mut self, start: i32, end: i32, velocity: f32) {
        // Simulate a bounce that started from the edge with the given velocity
        let decel = self.deceleration;
        let duration_to_apex = -velocity / decel;
        let distance_to_apex = velocity * velocity / 2.0 / decel.abs();
        let distance_to_edge = (end - start).abs() as f32;
        let total_duration = (2.0 * (distance_to_apex + distance_to_edge) / decel.abs()).sqrt();
        self.start_time -= (1000.0 * (total_duration - duration_to_apex)) as i64;
        self.start = end;
        self.current = end;
        self.velocity = -decel * total_duration;
    }

    fn start_bounce_after_edge(&mut self, start: i32, end: i32, velocity: f32) {
        self.deceleration = deceleration_for(if velocity == 0.0 {
            (start - end) as f32
        } else {
            velocity
        });
        self.fit_on_bounce_curve(start, end, velocity);
        self.on_edge_reached();
    }

    fn start_after_edge(&mut self, start: i32, min: i32, max: i32, velocity: f32, now: i64, spline: &FlingSpline) {
        if start > min && start < max {
            self.finished = true;
            return;
        }
        let positive = start > max;
        let edge = if positive { max } else { min };
        let over_distance = start - edge;
        let keep_increasing = over_distance as f32 * velocity >= 0.0;
        if keep_increasing {
            // Moving further out: decelerate, then come back
            self.start_bounce_after_edge(start, edge, velocity);
        } else if spline.distance(velocity) > over_distance.abs() as f64 {
            // Enough velocity to get back into range and keep going
            let (min, max) = if positive { (min, start) } else { (start, max) };
            self.fling(start, velocity, min, max, self.over, now, spline);
        } else {
            self.start_springback(start, edge);
        }
    }

    fn on_edge_reached(&mut self) {
        if self.over <= 0 {
            // No room to overshoot: stop dead at the edge
            self.mode = AxisMode::Ballistic;
            self.final_pos = self.start;
            self.velocity = 0.0;
            self.duration = 0;
            self.over = 0;
            return;
        }

        let velocity_squared = self.velocity * self.velocity;
        let mut distance = velocity_squared / (2.0 * self.deceleration.abs());
        let sign = self.velocity.signum();
        if distance > self.over as f32 {
            // Decelerate harder so the overshoot stops at `over`
            self.deceleration = -sign * velocity_squared / (2.0 * self.over as f32);
            distance = self.over as f32;
        }

        self.over = distance as i32;
        self.mode = AxisMode::Ballistic;
        let signed = if self.velocity > 0.0 { distance } else { -distance };
        self.final_pos = self.start + signed as i32;
        self.duration = -(1000.0 * self.velocity / self.deceleration) as i64;
    }

    /// Chain into the next segment once the current one ends
    fn continue_when_finished(&mut self, now: i64) -> bool {
        match self.mode {
            AxisMode::Spline => {
                if self.duration < self.spline_duration {
                    // Stopped early at an edge: overshoot with the velocity we had
                    self.start = self.final_pos;
                    self.current = self.final_pos;
                    self.velocity = self.curr_velocity;
                    self.deceleration = deceleration_for(self.velocity);
                    self.start_time += self.duration;
                    self.on_edge_reached();
                } else {
                    return false;
                }
            }
            AxisMode::Ballistic => {
                self.start_time += self.duration;
                self.start_springback(self.final_pos, self.start);
            }
            AxisMode::Cubic | AxisMode::Eased => return false,
        }
        self.update(now);
        true
    }

    /// Advance to `now`; false once the current segment has ended
    fn update(&mut self, now: i64) -> bool {
        if self.finished {
            return false;
        }
        let elapsed = now - self.start_time;
        if elapsed <= 0 {
            return self.duration > 0;
        }
        if elapsed > self.duration {
            return false;
        }

        let distance = match self.mode {
            AxisMode::Spline => {
                let t = elapsed as f32 / self.spline_duration as f32;
                let (distance_coef, velocity_coef) = spline::sample_position(t);
                self.curr_velocity =
                    velocity_coef * self.spline_distance as f32 / self.spline_duration as f32 * 1000.0;
                distance_coef * self.spline_distance as f32
            }
            AxisMode::Ballistic => {
                let t = elapsed as f32 / 1000.0;
                self.curr_velocity = self.velocity + self.deceleration * t;
                self.velocity * t + self.deceleration * t * t / 2.0
            }
            AxisMode::Cubic => {
                let t = elapsed as f32 / self.duration as f32;
                let t2 = t * t;
                let sign = self.velocity.signum();
                let over = self.over as f32;
                self.curr_velocity = sign * over * 6.0 * (-t + t2);
                sign * over * (3.0 * t2 - 2.0 * t * t2)
            }
            AxisMode::Eased => return false,
        };

        self.current = self.start + distance.round() as i32;
        true
    }

    /// Step this axis, chaining fling segments and finishing at rest
    fn step(&mut self, now: i64, easing: Easing) {
        if self.finished {
            return;
        }
        if self.mode == AxisMode::Eased {
            let elapsed = now - self.start_time;
            if elapsed < self.duration {
                self.update_scroll(easing.apply(elapsed as f32 / self.duration as f32));
            } else {
                self.finish();
            }
            return;
        }
        if !self.update(now) && !self.continue_when_finished(now) {
            self.finish();
        }
    }
}

// ============================================================================
// Scroller
// ============================================================================

/// Two-axis scroll animator
#[derive(Clone, Debug)]
pub struct Scroller {
    x: AxisScroller,
    y: AxisScroller,
    spline: FlingSpline,
    easing: Easing,
    trajectory: Option<Trajectory>,
}

impl Default for Scroller {
    fn default() -> Self {
        Self::new(FlingSpline::default(), Easing::ViscousFluid)
    }
}

impl Scroller {
    pub fn new(spline: FlingSpline, easing: Easing) -> Self {
        Self {
            x: AxisScroller::default(),
            y: AxisScroller::default(),
            spline,
            easing,
            trajectory: None,
        }
    }

    pub fn from_config(config: &ScrollConfig) -> Self {
        Self::new(
            FlingSpline::new(config.density, config.fling_friction),
            config.smooth_scroll_easing,
        )
    }

    /// Easing used by [`start_scroll`](Self::start_scroll)
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn is_finished(&self) -> bool {
        self.x.finished && self.y.finished
    }

    pub fn curr_x(&self) -> i32 {
        self.x.current
    }

    pub fn curr_y(&self) -> i32 {
        self.y.current
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisScroller {
        match axis {
            Axis::Horizontal => &mut self.x,
            Axis::Vertical => &mut self.y,
        }
    }

    pub fn curr_offset(&self) -> ScrollOffset {
        ScrollOffset::new(self.x.current, self.y.current)
    }

    /// Where the current segment will come to rest
    pub fn final_x(&self) -> i32 {
        self.x.final_pos
    }

    pub fn final_y(&self) -> i32 {
        self.y.final_pos
    }

    pub fn start_x(&self) -> i32 {
        self.x.start
    }

    pub fn start_y(&self) -> i32 {
        self.y.start
    }

    /// Magnitude of the current velocity in px/s
    pub fn curr_velocity(&self) -> f32 {
        self.x.curr_velocity.hypot(self.y.curr_velocity)
    }

    /// Current per-axis velocity in px/s
    pub fn curr_velocity_xy(&self) -> (f32, f32) {
        (self.x.curr_velocity, self.y.curr_velocity)
    }

    /// The trajectory in flight, if any
    pub fn trajectory(&self) -> Option<&Trajectory> {
        if self.is_finished() {
            None
        } else {
            self.trajectory.as_ref()
        }
    }

    /// Begin a fixed-duration eased scroll from `start` to `start + (dx, dy)`
    ///
    /// A non-positive duration finishes immediately at the target.
    pub fn start_scroll(&mut self, start: ScrollOffset, dx: i32, dy: i32, duration_ms: i64, now_ms: i64) {
        self.x.start_scroll(start.x, dx, duration_ms, now_ms);
        self.y.start_scroll(start.y, dy, duration_ms, now_ms);
        self.trajectory = Some(Trajectory {
            kind: TrajectoryKind::Scroll,
            start,
            target: ScrollOffset::new(start.x + dx, start.y + dy),
            velocity: (0.0, 0.0),
            start_time_ms: now_ms,
            duration_ms: Some(duration_ms.max(0)),
        });

        if duration_ms <= 0 {
            debug!("scroll with duration {}ms finishes immediately", duration_ms);
            self.abort();
            return;
        }
        debug!(
            "scroll from ({}, {}) by ({}, {}) over {}ms",
            start.x, start.y, dx, dy, duration_ms
        );
    }

    /// Begin a decelerating fling
    ///
    /// The resting point is clamped to `bounds`; the trajectory may overshoot
    /// a bound by up to `overfling` pixels before springing back.
    pub fn fling(
        &mut self,
        start: ScrollOffset,
        velocity: (f32, f32),
        bounds: ScrollBounds,
        overfling: i32,
        now_ms: i64,
    ) {
        let (mut vx, mut vy) = velocity;
        if !vx.is_finite() || !vy.is_finite() {
            warn!("non-finite fling velocity ({}, {}), treating as zero", vx, vy);
            vx = if vx.is_finite() { vx } else { 0.0 };
            vy = if vy.is_finite() { vy } else { 0.0 };
        }
        let over = overfling.max(0);

        self.x.fling(start.x, vx, bounds.min_x, bounds.max_x, over, now_ms, &self.spline);
        self.y.fling(start.y, vy, bounds.min_y, bounds.max_y, over, now_ms, &self.spline);
        self.trajectory = Some(Trajectory {
            kind: TrajectoryKind::Fling,
            start,
            target: ScrollOffset::new(self.x.final_pos, self.y.final_pos),
            velocity: (vx, vy),
            start_time_ms: now_ms,
            duration_ms: None,
        });
        debug!(
            "fling from ({}, {}) at ({:.0}, {:.0}) px/s toward ({}, {})",
            start.x, start.y, vx, vy, self.x.final_pos, self.y.final_pos
        );
    }

    /// Ease an out-of-range offset back into `bounds`
    ///
    /// Returns false without touching any running trajectory if `start` is
    /// already in range.
    pub fn spring_back(&mut self, start: ScrollOffset, bounds: ScrollBounds, now_ms: i64) -> bool {
        if bounds.contains(start) {
            return false;
        }
        let spring_x = self.x.springback(start.x, bounds.min_x, bounds.max_x, now_ms);
        let spring_y = self.y.springback(start.y, bounds.min_y, bounds.max_y, now_ms);
        if !(spring_x || spring_y) {
            return false;
        }

        self.trajectory = Some(Trajectory {
            kind: TrajectoryKind::SpringBack,
            start,
            target: ScrollOffset::new(self.x.final_pos, self.y.final_pos),
            velocity: (0.0, 0.0),
            start_time_ms: now_ms,
            duration_ms: Some(self.x.duration.max(self.y.duration)),
        });
        debug!(
            "spring back from ({}, {}) to ({}, {})",
            start.x, start.y, self.x.final_pos, self.y.final_pos
        );
        true
    }

    /// Spring one axis from `start` back into `[min, max]`, leaving the
    /// other axis running
    ///
    /// Returns false, changing nothing, if `start` is already in range.
    pub fn spring_back_axis(&mut self, axis: Axis, start: i32, min: i32, max: i32, now_ms: i64) -> bool {
        if (min..=max.max(min)).contains(&start) {
            return false;
        }
        let started = self.axis_mut(axis).springback(start, min, max, now_ms);
        if started {
            debug!("{:?} axis springs back from {}", axis, start);
        }
        started
    }

    /// Stop one axis at `position`, leaving the other axis running
    pub fn stop_axis_at(&mut self, axis: Axis, position: i32) {
        let scroller = self.axis_mut(axis);
        scroller.current = position;
        scroller.stop();
    }

    /// Stop at the current segment's resting point
    pub fn abort(&mut self) {
        self.x.finish();
        self.y.finish();
    }

    /// Stop immediately where the trajectory currently is
    pub fn force_finished(&mut self) {
        self.x.finished = true;
        self.y.finished = true;
        self.x.curr_velocity = 0.0;
        self.y.curr_velocity = 0.0;
    }

    /// Advance the trajectory to `now_ms`
    ///
    /// Returns true if the position was updated (including the step that
    /// reaches the end), false if nothing is in flight.
    pub fn compute_scroll_offset(&mut self, now_ms: i64) -> bool {
        if self.is_finished() {
            return false;
        }

        self.x.step(now_ms, self.easing);
        self.y.step(now_ms, self.easing);

        trace!(
            "scroller at ({}, {}) velocity {:.1} finished={}",
            self.x.current,
            self.y.current,
            self.curr_velocity(),
            self.is_finished()
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tick at 60fps until the scroller stops, returning every position seen
    fn run(scroller: &mut Scroller, start_ms: i64) -> Vec<ScrollOffset> {
        let mut seen = Vec::new();
        let mut now = start_ms;
        for _ in 0..2000 {
            now += 16;
            if !scroller.compute_scroll_offset(now) {
                return seen;
            }
            seen.push(scroller.curr_offset());
        }
        panic!("scroller did not settle");
    }

    #[test]
    fn test_fling_inside_range_stops_at_spline_distance() {
        let mut scroller = Scroller::default();
        scroller.fling(ScrollOffset::new(0, 100), (0.0, 500.0), ScrollBounds::new(0, 10_000), 6, 0);
        let expected = 100 + FlingSpline::default().distance(500.0) as i32;
        assert_eq!(scroller.final_y(), expected);

        run(&mut scroller, 0);
        assert!(scroller.is_finished());
        assert_eq!(scroller.curr_y(), expected);
        assert_eq!(scroller.curr_x(), 0);
    }

    #[test]
    fn test_fling_settles_on_bound() {
        let mut scroller = Scroller::default();
        scroller.fling(ScrollOffset::ZERO, (0.0, 3000.0), ScrollBounds::new(0, 500), 6, 0);
        assert_eq!(scroller.final_y(), 500);

        let positions = run(&mut scroller, 0);
        assert!(scroller.is_finished());
        assert_eq!(scroller.curr_y(), 500);
        assert!((0..=500).contains(&scroller.final_y()));
        // Overshoot is bounded by the overfling distance
        let peak = positions.iter().map(|p| p.y).max().unwrap_or(0);
        assert!(peak > 500 && peak <= 508, "peak {peak}");
    }

    #[test]
    fn test_fling_without_overfling_stops_at_bound() {
        let mut scroller = Scroller::default();
        scroller.fling(ScrollOffset::ZERO, (0.0, -3000.0), ScrollBounds::new(0, 500), 0, 0);
        let positions = run(&mut scroller, 0);
        assert_eq!(scroller.curr_y(), 0);
        assert!(positions.iter().all(|p| p.y >= -1));
    }

    #[test]
    fn test_fling_is_deterministic() {
        let mut a = Scroller::default();
        let mut b = Scroller::default();
        for s in [&mut a, &mut b] {
            s.fling(ScrollOffset::new(40, 300), (-1800.0, 2400.0), ScrollBounds::new(800, 900), 12, 1_000);
        }
        assert_eq!(run(&mut a, 1_000), run(&mut b, 1_000));
    }

    #[test]
    fn test_fling_from_overscroll_returns_to_range() {
        let mut scroller = Scroller::default();
        // Still moving outward: bounce
        scroller.fling(ScrollOffset::new(0, -40), (0.0, -800.0), ScrollBounds::new(0, 500), 20, 0);
        assert!(!scroller.is_finished());
        run(&mut scroller, 0);
        assert_eq!(scroller.curr_y(), 0);
    }

    #[test]
    fn test_spring_back_in_range_is_noop() {
        let mut scroller = Scroller::default();
        assert!(!scroller.spring_back(ScrollOffset::new(10, 100), ScrollBounds::new(50, 500), 0));
        assert!(scroller.is_finished());
        assert!(!scroller.compute_scroll_offset(16));
        assert!(scroller.trajectory().is_none());
    }

    #[test]
    fn test_spring_back_in_range_leaves_fling_running() {
        let mut scroller = Scroller::default();
        scroller.fling(ScrollOffset::ZERO, (0.0, 3000.0), ScrollBounds::new(0, 5000), 6, 0);
        assert!(scroller.compute_scroll_offset(16));
        let before = scroller.curr_offset();
        let target = scroller.final_y();

        assert!(!scroller.spring_back(ScrollOffset::new(0, 10), ScrollBounds::new(0, 5000), 16));
        assert!(!scroller.is_finished());
        assert_eq!(scroller.curr_offset(), before);
        assert_eq!(scroller.final_y(), target);
        assert_eq!(scroller.trajectory().map(|t| t.kind), Some(TrajectoryKind::Fling));

        run(&mut scroller, 16);
        assert_eq!(scroller.curr_y(), target);
    }

    #[test]
    fn test_stopping_one_axis_keeps_the_other_flinging() {
        let mut scroller = Scroller::default();
        scroller.fling(ScrollOffset::ZERO, (3000.0, 3000.0), ScrollBounds::new(5000, 5000), 6, 0);
        scroller.compute_scroll_offset(16);
        let x = scroller.curr_x();
        scroller.stop_axis_at(Axis::Horizontal, x);
        assert!(!scroller.is_finished());

        run(&mut scroller, 16);
        assert_eq!(scroller.curr_x(), x);
        assert_eq!(scroller.curr_y(), FlingSpline::default().distance(3000.0) as i32);
    }

    #[test]
    fn test_spring_back_axis() {
        let mut scroller = Scroller::default();
        assert!(!scroller.spring_back_axis(Axis::Vertical, 40, 0, 100, 0));
        assert!(scroller.is_finished());

        scroller.fling(ScrollOffset::ZERO, (2000.0, 0.0), ScrollBounds::new(5000, 100), 6, 0);
        assert!(scroller.spring_back_axis(Axis::Vertical, 106, 0, 100, 0));
        run(&mut scroller, 0);
        assert_eq!(scroller.curr_y(), 100);
        assert!(scroller.curr_x() > 0);
    }

    #[test]
    fn test_spring_back_converges() {
        let mut scroller = Scroller::default();
        assert!(scroller.spring_back(ScrollOffset::new(-30, 620), ScrollBounds::new(100, 500), 0));
        let trajectory = scroller.trajectory().copied().unwrap();
        assert_eq!(trajectory.kind, TrajectoryKind::SpringBack);
        assert_eq!(trajectory.target, ScrollOffset::new(0, 500));

        let positions = run(&mut scroller, 0);
        assert!(positions.len() < 60);
        assert_eq!(scroller.curr_offset(), ScrollOffset::new(0, 500));
    }

    #[test]
    fn test_start_scroll_reaches_target() {
        let mut scroller = Scroller::default();
        scroller.start_scroll(ScrollOffset::new(0, 0), 120, -40, 250, 0);
        assert!(scroller.compute_scroll_offset(100));
        let mid = scroller.curr_offset();
        assert!(mid.x > 0 && mid.x < 120);
        assert!(mid.y < 0 && mid.y > -40);

        assert!(scroller.compute_scroll_offset(250));
        assert_eq!(scroller.curr_offset(), ScrollOffset::new(120, -40));
        assert!(scroller.is_finished());
        assert!(!scroller.compute_scroll_offset(266));
    }

    #[test]
    fn test_zero_duration_scroll_finishes_immediately() {
        let mut scroller = Scroller::default();
        scroller.start_scroll(ScrollOffset::new(5, 5), 10, 10, 0, 0);
        assert!(scroller.is_finished());
        assert_eq!(scroller.curr_offset(), ScrollOffset::new(15, 15));
    }

    #[test]
    fn test_abort_finishes() {
        let mut scroller = Scroller::default();
        scroller.fling(ScrollOffset::ZERO, (0.0, 2000.0), ScrollBounds::new(0, 5000), 6, 0);
        scroller.compute_scroll_offset(16);
        scroller.abort();
        assert!(scroller.is_finished());
        assert!(!scroller.compute_scroll_offset(32));
    }

    #[test]
    fn test_equal_bounds_fling_finishes() {
        let mut scroller = Scroller::default();
        scroller.fling(ScrollOffset::ZERO, (2000.0, 2000.0), ScrollBounds::new(0, 0), 0, 0);
        run(&mut scroller, 0);
        assert!(scroller.is_finished());
        assert_eq!(scroller.curr_offset(), ScrollOffset::ZERO);
    }

    #[test]
    fn test_curr_velocity_is_magnitude() {
        let mut scroller = Scroller::default();
        scroller.fling(ScrollOffset::ZERO, (3000.0, 4000.0), ScrollBounds::new(10_000, 10_000), 0, 0);
        assert!((scroller.curr_velocity() - 5000.0).abs() < 1.0);
        scroller.compute_scroll_offset(50);
        let (vx, vy) = scroller.curr_velocity_xy();
        assert!(vx > 0.0 && vy > vx);
        assert!(scroller.curr_velocity() < 5000.0);
    }
}

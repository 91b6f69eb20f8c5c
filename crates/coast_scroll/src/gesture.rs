//! Touch gesture state machine
//!
//! Turns a stream of pointer events into scroll offset changes and hands
//! released drags over to the physics as flings or spring-backs.
//!
//! # State Machine
//!
//! ```text
//! Idle ──down in child──▶ Tracking ──moved past slop──▶ Dragging
//!  ▲                         │                             │
//!  │◀────────up/cancel───────┘                             │ up/cancel
//!  │                                                       ▼
//!  │◀──────────trajectory finished──────────────────── Settling
//!                                                          │
//!                              Dragging ◀──────down────────┘
//! ```
//!
//! A released drag enters `Settling` only if it starts a fling or has to
//! spring back into range; otherwise it returns straight to `Idle`.

use coast_animation::{OverscrollClamp, ScrollBounds, Scroller, Trajectory, VelocityEstimator};
use coast_core::{
    Axis, Edge, OverScrollMode, Point, PointerAction, PointerEvent, PointerId, Result, ScrollConfig,
    ScrollError, ScrollGeometry, ScrollOffset,
};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::effects::{move_offset, Effects, ScrollEffect};

/// Velocities are estimated in pixels per second
const VELOCITY_UNITS_MS: f32 = 1000.0;

// ============================================================================
// State
// ============================================================================

/// Current phase of the touch gesture
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureState {
    /// No gesture, no animation
    Idle,
    /// A finger is down on the content but has not moved past the touch slop
    Tracking { active_pointer: PointerId, down: Point },
    /// A finger is dragging the content
    Dragging { active_pointer: PointerId, last: Point },
    /// A fling, spring-back or smooth scroll is running
    Settling { trajectory: Trajectory },
}

impl GestureState {
    /// The pointer driving the gesture, if one is
    pub fn active_pointer(&self) -> Option<PointerId> {
        match self {
            GestureState::Tracking { active_pointer, .. } | GestureState::Dragging { active_pointer, .. } => {
                Some(*active_pointer)
            }
            GestureState::Idle | GestureState::Settling { .. } => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, GestureState::Dragging { .. })
    }

    pub fn is_settling(&self) -> bool {
        matches!(self, GestureState::Settling { .. })
    }
}

/// Whether a fling along one axis could move the offset at all
fn can_fling(scroll: i32, velocity: f32, range: i32) -> bool {
    (scroll > 0 || velocity > 0.0) && (scroll < range || velocity < 0.0)
}

// ============================================================================
// Gesture machine
// ============================================================================

/// Touch-driven scroll state for one container
///
/// Owns the velocity history of the current gesture and the physics that
/// animate the offset once the finger lifts. Geometry is passed in fresh on
/// every call; the offset itself belongs to the caller.
#[derive(Clone, Debug)]
pub struct GestureMachine {
    state: GestureState,
    config: ScrollConfig,
    /// Fingers currently down, with their last known position
    pointers: SmallVec<[(PointerId, Point); 4]>,
    velocity: VelocityEstimator,
    scroller: Scroller,
    /// Edges with an active pull, indexed by [`Edge::index`]
    pulled: [bool; 4],
}

impl Default for GestureMachine {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl GestureMachine {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            state: GestureState::Idle,
            scroller: Scroller::from_config(&config),
            config,
            pointers: SmallVec::new(),
            velocity: VelocityEstimator::new(),
            pulled: [false; 4],
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// The physics driving the current trajectory
    pub fn scroller(&self) -> &Scroller {
        &self.scroller
    }

    /// A finger is down on the content (tracking or dragging)
    pub fn is_touch_active(&self) -> bool {
        self.state.active_pointer().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_settling()
    }

    /// Number of fingers currently down
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Feed one pointer event
    ///
    /// Offset changes and edge feedback are appended to `effects`. An event
    /// for a pointer the gesture is not tracking is rejected with an error and
    /// leaves the machine untouched.
    pub fn on_pointer_event(
        &mut self,
        event: &PointerEvent,
        offset: &mut ScrollOffset,
        geometry: &ScrollGeometry,
        effects: &mut Effects,
    ) -> Result<()> {
        match event.action {
            PointerAction::Down => {
                self.on_down(event, offset, geometry);
                Ok(())
            }
            PointerAction::Move => self.on_move(event, offset, geometry, effects),
            PointerAction::Up => self.on_up(event, offset, geometry, effects),
            PointerAction::Cancel => {
                self.on_cancel(event.timestamp_ms, offset, geometry, effects);
                Ok(())
            }
        }
    }

    fn pointer_index(&self, pointer: PointerId) -> Result<usize> {
        if self.pointers.is_empty() {
            warn!("pointer {} event with no pointer down, skipping", pointer);
            return Err(ScrollError::NoActivePointer);
        }
        self.pointers
            .iter()
            .position(|(id, _)| *id == pointer)
            .ok_or_else(|| {
                warn!("pointer {} is not tracked, skipping", pointer);
                ScrollError::UnknownPointer(pointer)
            })
    }

    fn restart_velocity(&mut self, event: &PointerEvent) {
        self.velocity.reset();
        self.velocity.add_sample(event.x, event.y, event.timestamp_ms);
    }

    fn on_down(&mut self, event: &PointerEvent, offset: &ScrollOffset, geometry: &ScrollGeometry) {
        let pointer = event.pointer;
        let position = event.position();
        let gesture_start = self.pointers.is_empty();

        match self.pointers.iter_mut().find(|(id, _)| *id == pointer) {
            Some(entry) => entry.1 = position,
            None => self.pointers.push((pointer, position)),
        }

        match self.state {
            GestureState::Settling { .. } => {
                // Catch the content mid-flight
                self.scroller.force_finished();
                self.restart_velocity(event);
                self.state = GestureState::Dragging {
                    active_pointer: pointer,
                    last: position,
                };
                debug!(
                    "pointer {} interrupted settling at ({}, {}), dragging",
                    pointer, offset.x, offset.y
                );
            }
            GestureState::Idle => {
                if !gesture_start {
                    trace!("pointer {} joined an ignored gesture", pointer);
                    return;
                }
                if !geometry.child_contains(position, *offset) {
                    debug!(
                        "pointer {} down at ({}, {}) outside content, ignoring gesture",
                        pointer, position.x, position.y
                    );
                    return;
                }
                self.restart_velocity(event);
                self.state = GestureState::Tracking {
                    active_pointer: pointer,
                    down: position,
                };
                debug!("idle -> tracking pointer {}", pointer);
            }
            GestureState::Tracking { .. } => {
                // The newest finger takes over and measures slop afresh
                self.restart_velocity(event);
                self.state = GestureState::Tracking {
                    active_pointer: pointer,
                    down: position,
                };
            }
            GestureState::Dragging { .. } => {
                self.restart_velocity(event);
                self.state = GestureState::Dragging {
                    active_pointer: pointer,
                    last: position,
                };
                trace!("pointer {} took over the drag", pointer);
            }
        }
    }

    fn on_move(
        &mut self,
        event: &PointerEvent,
        offset: &mut ScrollOffset,
        geometry: &ScrollGeometry,
        effects: &mut Effects,
    ) -> Result<()> {
        let index = self.pointer_index(event.pointer)?;
        let position = event.position();
        self.pointers[index].1 = position;

        match self.state {
            GestureState::Tracking { active_pointer, down } if active_pointer == event.pointer => {
                let mut dx = down.x - position.x;
                let mut dy = down.y - position.y;
                let slop = self.config.touch_slop;
                let past_x = dx.abs() > slop;
                let past_y = dy.abs() > slop;
                if past_x || past_y {
                    if past_x {
                        dx -= slop * dx.signum();
                    }
                    if past_y {
                        dy -= slop * dy.signum();
                    }
                    self.state = GestureState::Dragging {
                        active_pointer,
                        last: position,
                    };
                    debug!("tracking -> dragging pointer {} by ({}, {})", active_pointer, dx, dy);
                    self.drag_by(dx, dy, position, offset, geometry, effects);
                }
                self.velocity.add_sample(event.x, event.y, event.timestamp_ms);
            }
            GestureState::Dragging { active_pointer, last } if active_pointer == event.pointer => {
                self.state = GestureState::Dragging {
                    active_pointer,
                    last: position,
                };
                self.drag_by(last.x - position.x, last.y - position.y, position, offset, geometry, effects);
                self.velocity.add_sample(event.x, event.y, event.timestamp_ms);
            }
            _ => trace!("move of pointer {} ignored while {:?}", event.pointer, self.state),
        }
        Ok(())
    }

    fn on_up(
        &mut self,
        event: &PointerEvent,
        offset: &mut ScrollOffset,
        geometry: &ScrollGeometry,
        effects: &mut Effects,
    ) -> Result<()> {
        let index = self.pointer_index(event.pointer)?;
        self.pointers.remove(index);
        let remaining = self.pointers.first().copied();
        let now = event.timestamp_ms;

        match (self.state, remaining) {
            (GestureState::Tracking { active_pointer, .. }, Some((next, position))) => {
                if active_pointer == event.pointer {
                    self.velocity.reset();
                    self.state = GestureState::Tracking {
                        active_pointer: next,
                        down: position,
                    };
                }
            }
            (GestureState::Dragging { active_pointer, .. }, Some((next, position))) => {
                if active_pointer == event.pointer {
                    // Snap to the remaining finger so the next move has no jump
                    self.velocity.reset();
                    self.state = GestureState::Dragging {
                        active_pointer: next,
                        last: position,
                    };
                    debug!("active pointer {} lifted, continuing with {}", event.pointer, next);
                }
            }
            (GestureState::Tracking { .. }, None) => {
                self.end_drag(effects);
                self.spring_back(*offset, geometry, now, effects);
            }
            (GestureState::Dragging { .. }, None) => {
                self.velocity.add_sample(event.x, event.y, now);
                let (vx, vy) = self
                    .velocity
                    .estimate_velocity(VELOCITY_UNITS_MS, self.config.max_fling_velocity);
                self.end_drag(effects);

                let min = self.config.min_fling_velocity;
                let flung = (vx.abs() > min || vy.abs() > min)
                    && self.start_fling(*offset, (-vx, -vy), geometry, now, effects);
                if !flung && !self.spring_back(*offset, geometry, now, effects) {
                    debug!("drag released at ({}, {}), idle", offset.x, offset.y);
                }
            }
            (GestureState::Idle | GestureState::Settling { .. }, _) => {}
        }
        Ok(())
    }

    fn on_cancel(
        &mut self,
        now: i64,
        offset: &ScrollOffset,
        geometry: &ScrollGeometry,
        effects: &mut Effects,
    ) {
        self.pointers.clear();
        if self.is_touch_active() {
            debug!("gesture cancelled at ({}, {})", offset.x, offset.y);
            self.end_drag(effects);
            self.spring_back(*offset, geometry, now, effects);
        }
    }

    fn end_drag(&mut self, effects: &mut Effects) {
        self.velocity.reset();
        for edge in Edge::ALL {
            self.release(edge, effects);
        }
        self.state = GestureState::Idle;
    }

    // =========================================================================
    // Offset updates
    // =========================================================================

    /// How far past `[0, range]` the offset may go along `axis`
    fn overscroll_allowance(&self, axis: Axis, geometry: &ScrollGeometry, distance: i32) -> i32 {
        match self.config.over_scroll_mode {
            OverScrollMode::Always => distance,
            OverScrollMode::IfContentScrolls if geometry.scroll_range(axis) > 0 => distance,
            _ => 0,
        }
    }

    fn drag_by(
        &mut self,
        dx: i32,
        dy: i32,
        pointer: Point,
        offset: &mut ScrollOffset,
        geometry: &ScrollGeometry,
        effects: &mut Effects,
    ) {
        let range_x = geometry.max_scroll_x();
        let range_y = geometry.max_scroll_y();
        let distance = self.config.overscroll_distance;
        let result = OverscrollClamp::over_scroll_by(
            *offset,
            dx,
            dy,
            range_x,
            range_y,
            self.overscroll_allowance(Axis::Horizontal, geometry, distance),
            self.overscroll_allowance(Axis::Vertical, geometry, distance),
        );
        if result.clamped() {
            // Motion against a bound says nothing about fling velocity
            self.velocity.reset();
        }

        if self.config.can_overscroll(range_x, range_y) {
            let width = geometry.viewport.outer(Axis::Horizontal).max(1) as f32;
            let height = geometry.viewport.outer(Axis::Vertical).max(1) as f32;
            let across_x = pointer.x as f32 / width;
            let across_y = pointer.y as f32 / height;

            let pulled_y = offset.y + dy;
            if pulled_y < 0 {
                self.pull(Edge::Top, dy as f32 / height, across_x, effects);
                self.release(Edge::Bottom, effects);
            } else if pulled_y > range_y {
                self.pull(Edge::Bottom, dy as f32 / height, 1.0 - across_x, effects);
                self.release(Edge::Top, effects);
            }

            let pulled_x = offset.x + dx;
            if pulled_x < 0 {
                self.pull(Edge::Left, dx as f32 / width, 1.0 - across_y, effects);
                self.release(Edge::Right, effects);
            } else if pulled_x > range_x {
                self.pull(Edge::Right, dx as f32 / width, across_y, effects);
                self.release(Edge::Left, effects);
            }
        }

        move_offset(offset, result.offset, effects);
    }

    fn pull(&mut self, edge: Edge, delta_fraction: f32, displacement: f32, effects: &mut Effects) {
        self.pulled[edge.index()] = true;
        effects.push(ScrollEffect::EdgePull {
            edge,
            delta_fraction: delta_fraction.abs(),
            displacement,
        });
    }

    fn release(&mut self, edge: Edge, effects: &mut Effects) {
        if std::mem::take(&mut self.pulled[edge.index()]) {
            effects.push(ScrollEffect::EdgeRelease { edge });
        }
    }

    // =========================================================================
    // Trajectories
    // =========================================================================

    fn enter_settling(&mut self, effects: &mut Effects) -> bool {
        match self.scroller.trajectory().copied() {
            Some(trajectory) => {
                debug!(
                    "settling: {:?} toward ({}, {})",
                    trajectory.kind, trajectory.target.x, trajectory.target.y
                );
                self.state = GestureState::Settling { trajectory };
                effects.push(ScrollEffect::RequestAnimationTick);
                true
            }
            None => {
                self.state = GestureState::Idle;
                false
            }
        }
    }

    /// Start a fling at `velocity` (scroll direction, px/s)
    ///
    /// Axes that cannot move in the velocity's direction do not fling.
    /// Returns false if nothing was started.
    pub fn start_fling(
        &mut self,
        offset: ScrollOffset,
        velocity: (f32, f32),
        geometry: &ScrollGeometry,
        now_ms: i64,
        effects: &mut Effects,
    ) -> bool {
        let range_x = geometry.max_scroll_x();
        let range_y = geometry.max_scroll_y();
        let vx = if can_fling(offset.x, velocity.0, range_x) { velocity.0 } else { 0.0 };
        let vy = if can_fling(offset.y, velocity.1, range_y) { velocity.1 } else { 0.0 };
        if vx == 0.0 && vy == 0.0 {
            trace!("fling ({}, {}) has nowhere to go", velocity.0, velocity.1);
            return false;
        }

        self.scroller.fling(
            offset,
            (vx, vy),
            ScrollBounds::new(range_x, range_y),
            self.config.overfling_distance,
            now_ms,
        );
        self.enter_settling(effects)
    }

    /// Start an eased scroll by `(dx, dy)` over the configured duration
    ///
    /// Returns false if the scroll finished immediately; the caller then
    /// applies the target itself.
    pub fn start_scroll(
        &mut self,
        offset: ScrollOffset,
        dx: i32,
        dy: i32,
        now_ms: i64,
        effects: &mut Effects,
    ) -> bool {
        let duration = i64::from(self.config.smooth_scroll_duration_ms);
        self.scroller.start_scroll(offset, dx, dy, duration, now_ms);
        self.enter_settling(effects)
    }

    /// Ease an out-of-range offset back into range
    ///
    /// Returns false, changing nothing, if the offset is already in range.
    pub fn spring_back(
        &mut self,
        offset: ScrollOffset,
        geometry: &ScrollGeometry,
        now_ms: i64,
        effects: &mut Effects,
    ) -> bool {
        let bounds = ScrollBounds::new(geometry.max_scroll_x(), geometry.max_scroll_y());
        if !self.scroller.spring_back(offset, bounds, now_ms) {
            return false;
        }
        self.enter_settling(effects)
    }

    /// Stop a running trajectory where it is
    ///
    /// Returns true if one was running.
    pub fn abort_animation(&mut self) -> bool {
        if !self.state.is_settling() {
            return false;
        }
        self.scroller.force_finished();
        self.state = GestureState::Idle;
        debug!("settling aborted");
        true
    }

    /// Advance a running trajectory to `now_ms`
    ///
    /// Returns true while the trajectory is still in flight.
    pub fn tick(
        &mut self,
        now_ms: i64,
        offset: &mut ScrollOffset,
        geometry: &ScrollGeometry,
        effects: &mut Effects,
    ) -> bool {
        if !self.state.is_settling() {
            return false;
        }

        if self.scroller.compute_scroll_offset(now_ms) {
            let old = *offset;
            let target = self.scroller.curr_offset();
            let velocity = self.scroller.curr_velocity();
            if old != target {
                let range_x = geometry.max_scroll_x();
                let range_y = geometry.max_scroll_y();
                let distance = self.config.overfling_distance;
                let result = OverscrollClamp::over_scroll_by(
                    old,
                    target.x - old.x,
                    target.y - old.y,
                    range_x,
                    range_y,
                    self.overscroll_allowance(Axis::Horizontal, geometry, distance),
                    self.overscroll_allowance(Axis::Vertical, geometry, distance),
                );
                move_offset(offset, result.offset, effects);

                // Only the axis that hit its limit stops; the other keeps going
                for (axis, clamped, range) in [
                    (Axis::Horizontal, result.clamped_x(), range_x),
                    (Axis::Vertical, result.clamped_y(), range_y),
                ] {
                    if !clamped || self.scroller.is_finished() {
                        continue;
                    }
                    let position = offset.get(axis);
                    if !self.scroller.spring_back_axis(axis, position, 0, range, now_ms) {
                        trace!("{:?} axis stopped at its bound {}", axis, position);
                        self.scroller.stop_axis_at(axis, position);
                    }
                }
                if self.config.can_overscroll(range_x, range_y) {
                    absorb_crossed_edges(old, *offset, range_x, range_y, velocity, effects);
                }
            }
        }

        if self.scroller.is_finished() {
            debug!("settled at ({}, {})", offset.x, offset.y);
            self.state = GestureState::Idle;
            return false;
        }
        if let Some(trajectory) = self.scroller.trajectory() {
            self.state = GestureState::Settling {
                trajectory: *trajectory,
            };
        }
        effects.push(ScrollEffect::RequestAnimationTick);
        true
    }
}

/// Report edges a trajectory step crossed on its way out of range
fn absorb_crossed_edges(
    old: ScrollOffset,
    new: ScrollOffset,
    range_x: i32,
    range_y: i32,
    velocity: f32,
    effects: &mut Effects,
) {
    let crossed = |axis: Axis, range: i32| -> Option<Edge> {
        let (before, after) = (old.get(axis), new.get(axis));
        if after < 0 && before >= 0 {
            Some(Edge::of(axis, false))
        } else if after > range && before <= range {
            Some(Edge::of(axis, true))
        } else {
            None
        }
    };

    for edge in [crossed(Axis::Vertical, range_y), crossed(Axis::Horizontal, range_x)]
        .into_iter()
        .flatten()
    {
        trace!("trajectory crossed {:?} at {:.0} px/s", edge, velocity);
        effects.push(ScrollEffect::EdgeAbsorb { edge, velocity });
    }
}

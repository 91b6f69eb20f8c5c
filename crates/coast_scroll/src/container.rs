//! Scroll container
//!
//! [`ScrollContainer`] is the host-facing object: one per scrollable view.
//! It owns the scroll offset and the gesture machine and exposes every way the
//! offset can change (touch, wheel, keyboard, programmatic scrolls and layout
//! lifecycle). The host passes the current [`ScrollGeometry`] into each call
//! and applies the returned [`ScrollUpdate`].

use std::fmt::Debug;

use coast_core::{
    Axis, Direction, KeyAction, KeyCode, KeyEvent, PointerEvent, Rect, Result, ScrollConfig, ScrollGeometry,
    ScrollOffset, Span, ViewportExtent, ANIMATED_SCROLL_GAP_MS,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::effects::{move_offset, Effects, ScrollUpdate};
use crate::focus::{
    arrow_jump, find_focusable_in_bounds, full_span, is_within_delta_of_screen, page_span,
    scroll_delta_for_span, scroll_delta_to_reveal, FadingEdges, FocusCandidate,
};
use crate::gesture::{GestureMachine, GestureState};

// ============================================================================
// Saved state
// ============================================================================

/// The scroll position, as persisted across a destroy/recreate cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SavedScrollState {
    pub x: i32,
    pub y: i32,
}

// ============================================================================
// Keyboard and focus
// ============================================================================

/// A keyboard scroll action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollCommand {
    /// Move focus to the next item or scroll by up to half a screen
    Arrow(Direction),
    /// Scroll by a screenful
    Page(Direction),
    /// Scroll to the start or end of the content
    Full(Direction),
}

impl ScrollCommand {
    /// Commands bound to a key press
    pub fn for_key(event: &KeyEvent) -> &'static [ScrollCommand] {
        use ScrollCommand::*;

        let alt = event.modifiers.alt();
        match event.key {
            KeyCode::UP if alt => &[Full(Direction::Up)],
            KeyCode::DOWN if alt => &[Full(Direction::Down)],
            KeyCode::LEFT if alt => &[Full(Direction::Left)],
            KeyCode::RIGHT if alt => &[Full(Direction::Right)],
            KeyCode::UP => &[Arrow(Direction::Up)],
            KeyCode::DOWN => &[Arrow(Direction::Down)],
            KeyCode::LEFT => &[Arrow(Direction::Left)],
            KeyCode::RIGHT => &[Arrow(Direction::Right)],
            KeyCode::SPACE if event.modifiers.shift() => &[Page(Direction::Up), Page(Direction::Left)],
            KeyCode::SPACE => &[Page(Direction::Down), Page(Direction::Right)],
            KeyCode::PAGE_UP => &[Page(Direction::Up)],
            KeyCode::PAGE_DOWN => &[Page(Direction::Down)],
            KeyCode::HOME => &[Full(Direction::Up)],
            KeyCode::END => &[Full(Direction::Down)],
            _ => &[],
        }
    }
}

/// The host's view of focus inside the container
///
/// Focus traversal belongs to the host's view tree; the container only asks
/// where focus is and where it would go next.
pub trait FocusContext {
    type Key: Copy + PartialEq + Debug;

    /// The focused descendant, or `None` if focus is on the container itself
    /// or elsewhere
    fn focused(&self) -> Option<FocusCandidate<Self::Key>>;

    /// The descendant focus would move to in `direction`
    fn next_focus(&self, direction: Direction) -> Option<FocusCandidate<Self::Key>>;

    /// Every focusable descendant, in content coordinates
    fn focusables(&self) -> &[FocusCandidate<Self::Key>];
}

/// A [`FocusContext`] for hosts without focusable content
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFocus;

impl FocusContext for NoFocus {
    type Key = ();

    fn focused(&self) -> Option<FocusCandidate<()>> {
        None
    }

    fn next_focus(&self, _direction: Direction) -> Option<FocusCandidate<()>> {
        None
    }

    fn focusables(&self) -> &[FocusCandidate<()>] {
        &[]
    }
}

/// How focus should move after a keyboard command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusChange<K> {
    /// Give focus to this descendant
    Focus(K),
    /// The focused descendant scrolled away; the container takes focus
    Reclaim,
}

/// Result of a keyboard command
#[derive(Clone, Debug, PartialEq)]
pub struct KeyOutcome<K> {
    /// The key was consumed
    pub handled: bool,
    pub focus: Option<FocusChange<K>>,
    pub update: ScrollUpdate,
}

// ============================================================================
// Container
// ============================================================================

/// Scroll state for one scrollable view
#[derive(Clone, Debug)]
pub struct ScrollContainer {
    gesture: GestureMachine,
    offset: ScrollOffset,
    /// Time of the last smooth scroll request
    last_smooth_scroll_ms: Option<i64>,
    /// A layout pass is pending; reveals wait for it
    layout_dirty: bool,
    pending_reveal: Option<Rect>,
    pending_restore: Option<SavedScrollState>,
}

impl Default for ScrollContainer {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollContainer {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            gesture: GestureMachine::new(config),
            offset: ScrollOffset::ZERO,
            last_smooth_scroll_ms: None,
            layout_dirty: true,
            pending_reveal: None,
            pending_restore: None,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        self.gesture.config()
    }

    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }

    pub fn state(&self) -> GestureState {
        self.gesture.state()
    }

    pub fn gesture(&self) -> &GestureMachine {
        &self.gesture
    }

    pub fn is_animating(&self) -> bool {
        self.gesture.is_animating()
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    /// Maximum offset on each axis
    pub fn scroll_range(&self, geometry: &ScrollGeometry) -> (i32, i32) {
        (geometry.max_scroll_x(), geometry.max_scroll_y())
    }

    pub fn can_scroll(&self, geometry: &ScrollGeometry) -> bool {
        geometry.can_scroll()
    }

    /// Largest arrow-key jump along an axis
    pub fn max_scroll_amount(&self, geometry: &ScrollGeometry, axis: Axis) -> i32 {
        geometry.max_scroll_amount(axis)
    }

    fn fading_edges(&self) -> FadingEdges {
        let config = self.gesture.config();
        FadingEdges {
            horizontal: config.horizontal_fading_edge,
            vertical: config.vertical_fading_edge,
        }
    }

    fn update(&self, effects: Effects) -> ScrollUpdate {
        ScrollUpdate {
            offset: self.offset,
            animating: self.gesture.is_animating(),
            effects,
        }
    }

    // =========================================================================
    // Touch and animation
    // =========================================================================

    /// Feed a pointer event to the gesture machine
    pub fn on_pointer_event(&mut self, event: &PointerEvent, geometry: &ScrollGeometry) -> Result<ScrollUpdate> {
        let mut effects = Effects::new();
        self.gesture
            .on_pointer_event(event, &mut self.offset, geometry, &mut effects)?;
        Ok(self.update(effects))
    }

    /// Advance any running trajectory to `now_ms`
    pub fn tick(&mut self, now_ms: i64, geometry: &ScrollGeometry) -> ScrollUpdate {
        let mut effects = Effects::new();
        self.gesture.tick(now_ms, &mut self.offset, geometry, &mut effects);
        self.update(effects)
    }

    /// Fling at `(vx, vy)` px/s in scroll direction
    pub fn fling(&mut self, vx: f32, vy: f32, now_ms: i64, geometry: &ScrollGeometry) -> ScrollUpdate {
        let mut effects = Effects::new();
        if !geometry.content.is_empty() {
            self.gesture.abort_animation();
            self.gesture
                .start_fling(self.offset, (vx, vy), geometry, now_ms, &mut effects);
        }
        self.update(effects)
    }

    // =========================================================================
    // Programmatic scrolling
    // =========================================================================

    /// Jump to `(x, y)`, clamped to the scroll range
    pub fn scroll_to(&mut self, x: i32, y: i32, geometry: &ScrollGeometry) -> ScrollUpdate {
        let mut effects = Effects::new();
        self.scroll_to_into(x, y, geometry, &mut effects);
        self.update(effects)
    }

    /// Jump by `(dx, dy)`, clamped to the scroll range
    pub fn scroll_by(&mut self, dx: i32, dy: i32, geometry: &ScrollGeometry) -> ScrollUpdate {
        self.scroll_to(self.offset.x + dx, self.offset.y + dy, geometry)
    }

    fn scroll_to_into(&mut self, x: i32, y: i32, geometry: &ScrollGeometry, effects: &mut Effects) {
        if geometry.content.is_empty() {
            return;
        }
        self.gesture.abort_animation();
        let target = geometry.clamp(ScrollOffset::new(x, y));
        move_offset(&mut self.offset, target, effects);
    }

    /// Animate by `(dx, dy)`, clamped to the scroll range
    ///
    /// A request arriving within [`ANIMATED_SCROLL_GAP_MS`] of the previous
    /// one cancels any running animation and jumps instead.
    pub fn smooth_scroll_by(&mut self, dx: i32, dy: i32, now_ms: i64, geometry: &ScrollGeometry) -> ScrollUpdate {
        let mut effects = Effects::new();
        self.smooth_scroll_by_into(dx, dy, now_ms, geometry, &mut effects);
        self.update(effects)
    }

    /// Animate to `(x, y)`, clamped to the scroll range
    pub fn smooth_scroll_to(&mut self, x: i32, y: i32, now_ms: i64, geometry: &ScrollGeometry) -> ScrollUpdate {
        self.smooth_scroll_by(x - self.offset.x, y - self.offset.y, now_ms, geometry)
    }

    fn smooth_scroll_by_into(
        &mut self,
        dx: i32,
        dy: i32,
        now_ms: i64,
        geometry: &ScrollGeometry,
        effects: &mut Effects,
    ) {
        if geometry.content.is_empty() {
            return;
        }

        let animate = self
            .last_smooth_scroll_ms
            .map_or(true, |last| now_ms - last > ANIMATED_SCROLL_GAP_MS);
        self.last_smooth_scroll_ms = Some(now_ms);

        if !animate || self.gesture.is_touch_active() {
            trace!("smooth scroll by ({}, {}) applied immediately", dx, dy);
            self.scroll_to_into(self.offset.x + dx, self.offset.y + dy, geometry, effects);
            return;
        }

        let target = geometry.clamp(ScrollOffset::new(self.offset.x + dx, self.offset.y + dy));
        if target == self.offset {
            return;
        }
        self.gesture.abort_animation();
        let (dx, dy) = (target.x - self.offset.x, target.y - self.offset.y);
        if !self.gesture.start_scroll(self.offset, dx, dy, now_ms, effects) {
            move_offset(&mut self.offset, target, effects);
        }
    }

    /// Scroll by `(dx, dy)`, animated if smooth scrolling is enabled
    fn do_scroll(&mut self, dx: i32, dy: i32, now_ms: i64, geometry: &ScrollGeometry, effects: &mut Effects) {
        if dx == 0 && dy == 0 {
            return;
        }
        if self.gesture.config().smooth_scrolling_enabled {
            self.smooth_scroll_by_into(dx, dy, now_ms, geometry, effects);
        } else {
            self.scroll_to_into(self.offset.x + dx, self.offset.y + dy, geometry, effects);
        }
    }

    fn do_scroll_along(
        &mut self,
        axis: Axis,
        delta: i32,
        now_ms: i64,
        geometry: &ScrollGeometry,
        effects: &mut Effects,
    ) {
        match axis {
            Axis::Horizontal => self.do_scroll(delta, 0, now_ms, geometry, effects),
            Axis::Vertical => self.do_scroll(0, delta, now_ms, geometry, effects),
        }
    }

    /// Where the offset ends up once any running scroll completes
    fn destination(&self) -> ScrollOffset {
        match self.gesture.state() {
            GestureState::Settling { trajectory } => trajectory.target,
            _ => self.offset,
        }
    }

    // =========================================================================
    // Wheel
    // =========================================================================

    /// Apply a mouse wheel step
    ///
    /// `vertical` is positive when the wheel moves away from the user (scroll
    /// up); `horizontal` is positive to the right. Axes without a configured
    /// scroll factor are left to the host. The update is empty if nothing
    /// moved.
    pub fn on_wheel(&mut self, vertical: f32, horizontal: f32, geometry: &ScrollGeometry) -> ScrollUpdate {
        let mut effects = Effects::new();
        if self.gesture.is_dragging() || geometry.content.is_empty() {
            return self.update(effects);
        }

        let config = self.gesture.config();
        let mut target = self.offset;
        if let Some(factor) = config.vertical_scroll_factor {
            if vertical != 0.0 {
                let delta = (vertical * factor) as i32;
                target.y = (self.offset.y - delta).clamp(0, geometry.max_scroll_y());
            }
        }
        if let Some(factor) = config.horizontal_scroll_factor {
            if horizontal != 0.0 {
                let delta = (horizontal * factor) as i32;
                target.x = (self.offset.x + delta).clamp(0, geometry.max_scroll_x());
            }
        }

        if target != self.offset {
            self.gesture.abort_animation();
            move_offset(&mut self.offset, target, &mut effects);
        }
        self.update(effects)
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Handle a key press
    ///
    /// When the content fits the viewport the only possible reaction is
    /// moving focus to the next focusable item (down, then right).
    pub fn on_key<F: FocusContext>(
        &mut self,
        event: &KeyEvent,
        focus: &F,
        now_ms: i64,
        geometry: &ScrollGeometry,
    ) -> KeyOutcome<F::Key> {
        let mut outcome = KeyOutcome {
            handled: false,
            focus: None,
            update: self.update(Effects::new()),
        };
        if event.action != KeyAction::Down {
            return outcome;
        }

        if !geometry.can_scroll() {
            let next = focus
                .next_focus(Direction::Down)
                .or_else(|| focus.next_focus(Direction::Right));
            if let Some(next) = next {
                outcome.handled = true;
                outcome.focus = Some(FocusChange::Focus(next.key));
            }
            return outcome;
        }

        let mut effects = Effects::new();
        for command in ScrollCommand::for_key(event) {
            let (handled, change) = self.run_command(*command, focus, now_ms, geometry, &mut effects);
            outcome.handled |= handled;
            if change.is_some() {
                outcome.focus = change;
            }
        }
        debug!("key {:?} handled={}", event.key, outcome.handled);
        outcome.update = self.update(effects);
        outcome
    }

    /// Run one keyboard command
    ///
    /// Unhandled when the content fits the viewport.
    pub fn execute<F: FocusContext>(
        &mut self,
        command: ScrollCommand,
        focus: &F,
        now_ms: i64,
        geometry: &ScrollGeometry,
    ) -> KeyOutcome<F::Key> {
        let mut effects = Effects::new();
        if !geometry.can_scroll() {
            return KeyOutcome {
                handled: false,
                focus: None,
                update: self.update(effects),
            };
        }
        let (handled, focus) = self.run_command(command, focus, now_ms, geometry, &mut effects);
        KeyOutcome {
            handled,
            focus,
            update: self.update(effects),
        }
    }

    fn run_command<F: FocusContext>(
        &mut self,
        command: ScrollCommand,
        focus: &F,
        now_ms: i64,
        geometry: &ScrollGeometry,
        effects: &mut Effects,
    ) -> (bool, Option<FocusChange<F::Key>>) {
        match command {
            ScrollCommand::Arrow(direction) => self.arrow_scroll(direction, focus, now_ms, geometry, effects),
            ScrollCommand::Page(direction) => {
                let span = page_span(direction, self.offset, geometry);
                self.scroll_and_focus(direction, span, focus, now_ms, geometry, effects)
            }
            ScrollCommand::Full(direction) => {
                let span = full_span(direction, geometry);
                self.scroll_and_focus(direction, span, focus, now_ms, geometry, effects)
            }
        }
    }

    fn arrow_scroll<F: FocusContext>(
        &mut self,
        direction: Direction,
        focus: &F,
        now_ms: i64,
        geometry: &ScrollGeometry,
        effects: &mut Effects,
    ) -> (bool, Option<FocusChange<F::Key>>) {
        let axis = direction.axis();
        let max_jump = geometry.max_scroll_amount(axis);
        let size = geometry.viewport.inner(axis);

        let next = focus
            .next_focus(direction)
            .filter(|next| is_within_delta_of_screen(next.rect, axis, max_jump, self.offset, size));
        if let Some(next) = next {
            let (dx, dy) = scroll_delta_to_reveal(next.rect, self.offset, geometry, self.fading_edges());
            self.do_scroll(dx, dy, now_ms, geometry, effects);
            trace!("arrow {:?} moves focus to {:?}", direction, next.key);
            return (true, Some(FocusChange::Focus(next.key)));
        }

        let jump = arrow_jump(direction, self.offset, geometry);
        if jump == 0 {
            return (false, None);
        }
        self.do_scroll_along(axis, jump, now_ms, geometry, effects);

        // Focus left behind off screen goes back to the container
        let reclaim = focus.focused().is_some_and(|current| {
            !is_within_delta_of_screen(current.rect, axis, 0, self.destination(), size)
        });
        (true, reclaim.then_some(FocusChange::Reclaim))
    }

    fn scroll_and_focus<F: FocusContext>(
        &mut self,
        direction: Direction,
        span: Span,
        focus: &F,
        now_ms: i64,
        geometry: &ScrollGeometry,
        effects: &mut Effects,
    ) -> (bool, Option<FocusChange<F::Key>>) {
        let candidate = find_focusable_in_bounds(focus.focusables(), direction, span).copied();
        let current = focus.focused();

        let change = match (candidate, current) {
            (Some(candidate), Some(current)) if candidate.key == current.key => None,
            (Some(candidate), _) => Some(FocusChange::Focus(candidate.key)),
            (None, Some(_)) => Some(FocusChange::Reclaim),
            (None, None) => None,
        };

        match scroll_delta_for_span(direction, span, self.offset, geometry) {
            Some(delta) => {
                self.do_scroll_along(direction.axis(), delta, now_ms, geometry, effects);
                (true, change)
            }
            None => (false, change),
        }
    }

    // =========================================================================
    // Reveal and focus
    // =========================================================================

    /// Scroll the minimum amount that brings `rect` (content coordinates) on
    /// screen
    pub fn reveal_rect(
        &mut self,
        rect: Rect,
        immediate: bool,
        now_ms: i64,
        geometry: &ScrollGeometry,
    ) -> ScrollUpdate {
        let mut effects = Effects::new();
        self.reveal_into(rect, immediate, now_ms, geometry, &mut effects);
        self.update(effects)
    }

    fn reveal_into(
        &mut self,
        rect: Rect,
        immediate: bool,
        now_ms: i64,
        geometry: &ScrollGeometry,
        effects: &mut Effects,
    ) -> bool {
        let (dx, dy) = scroll_delta_to_reveal(rect, self.offset, geometry, self.fading_edges());
        if dx == 0 && dy == 0 {
            return false;
        }
        debug!("revealing {:?} by ({}, {})", rect, dx, dy);
        if immediate {
            self.scroll_to_into(self.offset.x + dx, self.offset.y + dy, geometry, effects);
        } else {
            self.smooth_scroll_by_into(dx, dy, now_ms, geometry, effects);
        }
        true
    }

    /// A descendant at `rect` took focus
    ///
    /// The rect is revealed immediately, or after the next layout pass if one
    /// is pending.
    pub fn request_child_focus(&mut self, rect: Rect, now_ms: i64, geometry: &ScrollGeometry) -> ScrollUpdate {
        if self.layout_dirty {
            trace!("layout pending, deferring reveal of {:?}", rect);
            self.pending_reveal = Some(rect);
            return self.update(Effects::new());
        }
        self.reveal_rect(rect, true, now_ms, geometry)
    }

    /// Mark the layout as stale; reveals wait for the next [`on_layout`](Self::on_layout)
    pub fn invalidate_layout(&mut self) {
        self.layout_dirty = true;
    }

    /// A layout pass finished with `geometry`
    ///
    /// Applies a deferred reveal and a pending restore, then clamps the offset
    /// into the new range.
    pub fn on_layout(&mut self, now_ms: i64, geometry: &ScrollGeometry) -> ScrollUpdate {
        let mut effects = Effects::new();
        self.layout_dirty = false;

        if let Some(rect) = self.pending_reveal.take() {
            self.reveal_into(rect, true, now_ms, geometry, &mut effects);
        }
        if let Some(saved) = self.pending_restore.take() {
            debug!("restoring scroll position ({}, {})", saved.x, saved.y);
            self.gesture.abort_animation();
            let restored = geometry.clamp(ScrollOffset::new(saved.x, saved.y));
            move_offset(&mut self.offset, restored, &mut effects);
        }

        if !self.gesture.is_touch_active() && !self.gesture.is_animating() {
            let clamped = geometry.clamp(self.offset);
            move_offset(&mut self.offset, clamped, &mut effects);
        }
        self.update(effects)
    }

    /// The viewport changed size from `old_viewport` to `geometry.viewport`
    ///
    /// A focused rect that was visible before the resize is kept visible.
    pub fn on_viewport_resized(
        &mut self,
        old_viewport: ViewportExtent,
        focused: Option<Rect>,
        now_ms: i64,
        geometry: &ScrollGeometry,
    ) -> ScrollUpdate {
        let mut effects = Effects::new();
        if let Some(rect) = focused {
            let (mut dx, mut dy) = scroll_delta_to_reveal(rect, self.offset, geometry, self.fading_edges());
            let was_visible =
                |axis: Axis| is_within_delta_of_screen(rect, axis, 0, self.offset, old_viewport.inner(axis));
            if !was_visible(Axis::Horizontal) {
                dx = 0;
            }
            if !was_visible(Axis::Vertical) {
                dy = 0;
            }
            self.do_scroll(dx, dy, now_ms, geometry, &mut effects);
        }
        self.update(effects)
    }

    // =========================================================================
    // State persistence
    // =========================================================================

    pub fn save_state(&self) -> SavedScrollState {
        SavedScrollState {
            x: self.offset.x,
            y: self.offset.y,
        }
    }

    /// Restore a saved position once the next layout pass has valid bounds
    pub fn restore_state(&mut self, saved: SavedScrollState) {
        self.pending_restore = Some(saved);
        self.layout_dirty = true;
    }
}

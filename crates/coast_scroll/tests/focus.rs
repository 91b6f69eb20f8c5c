//! Integration tests for keyboard, focus and lifecycle scrolling
//!
//! These tests verify that:
//! - Revealing a rect scrolls exactly far enough and never past the content
//! - Arrow keys hand focus to a reachable item or jump half a screen
//! - Page and home/end keys focus the best item inside the new screen
//! - Content that fits the viewport only moves focus
//! - Saved positions restore exactly, and clamp when the content shrank
//! - A viewport resize keeps the focused item visible

use coast_core::{
    ContentExtent, Direction, KeyCode, KeyEvent, Modifiers, Rect, ScrollConfig, ScrollGeometry, ScrollOffset,
    ViewportExtent,
};
use coast_scroll::{FocusCandidate, FocusChange, FocusContext, SavedScrollState, ScrollCommand, ScrollContainer};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn geometry(viewport: (i32, i32), content: (i32, i32)) -> ScrollGeometry {
    ScrollGeometry::new(
        ViewportExtent::new(viewport.0, viewport.1),
        ContentExtent::new(content.0, content.1),
    )
}

/// A container that scrolls without animation, laid out once
fn immediate(geometry: &ScrollGeometry) -> ScrollContainer {
    let mut container = ScrollContainer::new(ScrollConfig {
        smooth_scrolling_enabled: false,
        ..ScrollConfig::default()
    });
    container.on_layout(0, geometry);
    container
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::down(code, Modifiers::NONE)
}

/// A vertical list of focusable rows
struct Rows {
    items: Vec<FocusCandidate<usize>>,
    focused: Option<usize>,
}

impl Rows {
    fn uniform(count: usize, height: i32) -> Self {
        let items = (0..count)
            .map(|i| FocusCandidate::new(i, Rect::from_xywh(0, i as i32 * height, 500, height)))
            .collect();
        Self { items, focused: None }
    }

    fn focus(mut self, index: usize) -> Self {
        self.focused = Some(index);
        self
    }
}

impl FocusContext for Rows {
    type Key = usize;

    fn focused(&self) -> Option<FocusCandidate<usize>> {
        self.focused.and_then(|i| self.items.get(i).copied())
    }

    fn next_focus(&self, direction: Direction) -> Option<FocusCandidate<usize>> {
        let Some(current) = self.focused else {
            return self.items.first().copied();
        };
        match direction {
            Direction::Down => self.items.get(current + 1).copied(),
            Direction::Up => current.checked_sub(1).and_then(|i| self.items.get(i).copied()),
            Direction::Left | Direction::Right => None,
        }
    }

    fn focusables(&self) -> &[FocusCandidate<usize>] {
        &self.items
    }
}

/// A rect at the bottom of the content scrolls the whole remaining range
#[test]
fn test_reveal_bottom_corner_rect() {
    init_tracing();
    let g = geometry((1000, 1000), (2000, 3000));
    let mut container = immediate(&g);
    let update = container.reveal_rect(Rect::new(100, 2800, 300, 3000), true, 0, &g);
    assert_eq!(update.offset, ScrollOffset::new(0, 2000));
    assert_eq!(update.offset.y, g.max_scroll_y());
}

/// The next row is in reach: reveal it and move focus
#[test]
fn test_arrow_moves_focus_to_reachable_row() {
    init_tracing();
    let g = geometry((500, 500), (500, 3000));
    let mut container = immediate(&g);
    let rows = Rows::uniform(20, 150).focus(2);

    let outcome = container.on_key(&key(KeyCode::DOWN), &rows, 0, &g);
    assert!(outcome.handled);
    assert_eq!(outcome.focus, Some(FocusChange::Focus(3)));
    assert_eq!(outcome.update.offset, ScrollOffset::new(0, 100));
}

/// The next item is far away: jump half a screen and take focus back
#[test]
fn test_arrow_jump_reclaims_focus_left_off_screen() {
    let g = geometry((500, 500), (500, 3000));
    let mut container = immediate(&g);
    let rows = Rows {
        items: vec![
            FocusCandidate::new(0, Rect::new(0, 0, 500, 100)),
            FocusCandidate::new(1, Rect::new(0, 2000, 500, 2100)),
        ],
        focused: Some(0),
    };

    let outcome = container.on_key(&key(KeyCode::DOWN), &rows, 0, &g);
    assert!(outcome.handled);
    assert_eq!(outcome.update.offset, ScrollOffset::new(0, 250));
    assert_eq!(outcome.focus, Some(FocusChange::Reclaim));
}

/// Page down focuses the fully visible row nearest the bottom of the new page
#[test]
fn test_page_down_focuses_last_contained_row() {
    let g = geometry((500, 500), (500, 3000));
    let mut container = immediate(&g);
    let rows = Rows::uniform(20, 150);

    let outcome = container.on_key(&key(KeyCode::PAGE_DOWN), &rows, 0, &g);
    assert!(outcome.handled);
    assert_eq!(outcome.update.offset, ScrollOffset::new(0, 500));
    assert_eq!(outcome.focus, Some(FocusChange::Focus(5)));
}

/// Home from the middle focuses the topmost row strictly inside the first
/// screen; row 0 touches the screen edge and only overlaps
#[test]
fn test_home_focuses_first_contained_row() {
    let g = geometry((500, 500), (500, 3000));
    let mut container = immediate(&g);
    container.scroll_to(0, 1200, &g);
    let rows = Rows::uniform(20, 150).focus(9);

    let outcome = container.execute(ScrollCommand::Full(Direction::Up), &rows, 0, &g);
    assert!(outcome.handled);
    assert_eq!(outcome.update.offset, ScrollOffset::ZERO);
    assert_eq!(outcome.focus, Some(FocusChange::Focus(1)));
}

/// Without overflow, keys only propose the next focusable item
#[test]
fn test_unscrollable_content_only_moves_focus() {
    let g = geometry((500, 500), (500, 400));
    let mut container = immediate(&g);
    let rows = Rows::uniform(2, 150);

    let outcome = container.on_key(&key(KeyCode::PAGE_DOWN), &rows, 0, &g);
    assert!(outcome.handled);
    assert_eq!(outcome.focus, Some(FocusChange::Focus(0)));
    assert!(!outcome.update.scrolled());

    let empty = Rows { items: Vec::new(), focused: None };
    assert!(!container.on_key(&key(KeyCode::DOWN), &empty, 0, &g).handled);
}

/// Saving and restoring with the same content reproduces the offset
#[test]
fn test_restore_is_idempotent() {
    init_tracing();
    let g = geometry((500, 500), (800, 3000));
    let mut container = immediate(&g);
    container.scroll_to(120, 1777, &g);

    let json = serde_json::to_string(&container.save_state()).unwrap();
    let saved: SavedScrollState = serde_json::from_str(&json).unwrap();

    let mut recreated = ScrollContainer::default();
    recreated.restore_state(saved);
    assert_eq!(recreated.offset(), ScrollOffset::ZERO);
    recreated.on_layout(0, &g);
    assert_eq!(recreated.offset(), ScrollOffset::new(120, 1777));
    assert_eq!(recreated.save_state(), container.save_state());
}

/// A saved position past the end of shrunken content is clamped
#[test]
fn test_restore_clamps_to_shrunken_content() {
    let mut recreated = ScrollContainer::default();
    recreated.restore_state(SavedScrollState { x: 0, y: 2500 });
    let update = recreated.on_layout(0, &geometry((500, 500), (500, 1500)));
    assert_eq!(update.offset, ScrollOffset::new(0, 1000));
}

/// Content shrinking under the offset pulls it back into range
#[test]
fn test_layout_clamps_existing_offset() {
    let g = geometry((500, 500), (500, 3000));
    let mut container = immediate(&g);
    container.scroll_to(0, 2500, &g);
    let update = container.on_layout(0, &geometry((500, 500), (500, 900)));
    assert_eq!(update.offset, ScrollOffset::new(0, 400));
    assert!(update.scrolled());
}

/// Shrinking the viewport keeps a visible focused row on screen
#[test]
fn test_resize_keeps_focused_row_visible() {
    let before = ViewportExtent::new(500, 500);
    let after = geometry((500, 300), (500, 3000));
    let mut container = immediate(&geometry((500, 500), (500, 3000)));

    let visible = Rect::new(0, 400, 500, 450);
    let update = container.on_viewport_resized(before, Some(visible), 0, &after);
    assert_eq!(update.offset, ScrollOffset::new(0, 150));

    let hidden = Rect::new(0, 1200, 500, 1250);
    let update = container.on_viewport_resized(before, Some(hidden), 0, &after);
    assert!(!update.scrolled());
}

/// Smooth arrow scrolls animate to the same place an immediate one jumps to
#[test]
fn test_smooth_arrow_scroll_reaches_target() {
    let g = geometry((500, 500), (500, 3000));
    let mut container = ScrollContainer::default();
    container.on_layout(0, &g);

    let outcome = container.on_key(&key(KeyCode::DOWN), &coast_scroll::NoFocus, 1_000, &g);
    assert!(outcome.handled);
    assert!(outcome.update.animating);

    let mut now = 1_000;
    while container.is_animating() {
        now += 16;
        container.tick(now, &g);
    }
    assert_eq!(container.offset(), ScrollOffset::new(0, 250));
}

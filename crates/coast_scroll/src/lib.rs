//! Coast Scroll
//!
//! Engine-agnostic scroll containers: touch drags and flings, mouse wheel,
//! keyboard and focus scrolling, state restoration.
//!
//! # Features
//!
//! - **Gesture state machine**: touch slop, multi-touch pointer hand-over,
//!   fling or spring-back on release
//! - **Overscroll feedback**: edge pull, absorb and release effects for hosts
//!   that draw edge glows
//! - **Keyboard scrolling**: arrows, page up/down, home/end and space, with
//!   focus hand-off to the host's focusable items
//! - **Lifecycle**: deferred reveals and restores that wait for valid layout
//! - **Scheduling**: many containers ticked from one animation loop
//!
//! # Example
//!
//! ```
//! use coast_core::{ContentExtent, PointerEvent, ScrollGeometry, ViewportExtent};
//! use coast_scroll::ScrollContainer;
//!
//! let geometry = ScrollGeometry::new(ViewportExtent::new(400, 400), ContentExtent::new(400, 2000));
//! let mut container = ScrollContainer::default();
//! container.on_layout(0, &geometry);
//!
//! container.on_pointer_event(&PointerEvent::down(0, 200.0, 300.0, 0), &geometry).unwrap();
//! let update = container
//!     .on_pointer_event(&PointerEvent::moved(0, 200.0, 250.0, 16), &geometry)
//!     .unwrap();
//! assert_eq!(update.offset.y, 42);
//! ```

pub mod container;
pub mod effects;
pub mod focus;
pub mod gesture;
pub mod scheduler;

pub use container::{
    FocusChange, FocusContext, KeyOutcome, NoFocus, SavedScrollState, ScrollCommand, ScrollContainer,
};
pub use effects::{Effects, ScrollEffect, ScrollHost, ScrollUpdate};
pub use focus::{FadingEdges, FocusCandidate};
pub use gesture::{GestureMachine, GestureState};
pub use scheduler::{ScrollId, ScrollScheduler};

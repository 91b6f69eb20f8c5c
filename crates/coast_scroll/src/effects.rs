//! Side effects produced by scroll operations
//!
//! The core never touches the host directly. Every operation collects what
//! the host should do into a [`ScrollUpdate`]; hosts either inspect the
//! effects themselves or hand them to a [`ScrollHost`] via
//! [`ScrollUpdate::dispatch`].

use coast_core::{Edge, ScrollOffset};
use smallvec::SmallVec;
use tracing::trace;

/// Something the host should react to
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollEffect {
    /// The offset moved; redraw the visible window at `new`
    ScrollChanged { old: ScrollOffset, new: ScrollOffset },
    /// A drag is pulling past `edge`
    ///
    /// `delta_fraction` is the pull as a fraction of the viewport dimension;
    /// `displacement` is where across the edge the finger is, from 0 to 1.
    EdgePull {
        edge: Edge,
        delta_fraction: f32,
        displacement: f32,
    },
    /// A fling hit `edge` while moving at `velocity` px/s
    EdgeAbsorb { edge: Edge, velocity: f32 },
    /// A pull on `edge` ended
    EdgeRelease { edge: Edge },
    /// A trajectory is in flight; call `tick` on the next frame
    RequestAnimationTick,
}

impl ScrollEffect {
    /// The edge this effect targets, for edge-glow effects
    pub fn edge(&self) -> Option<Edge> {
        match self {
            ScrollEffect::EdgePull { edge, .. }
            | ScrollEffect::EdgeAbsorb { edge, .. }
            | ScrollEffect::EdgeRelease { edge } => Some(*edge),
            _ => None,
        }
    }
}

/// Effects collected during one operation
pub type Effects = SmallVec<[ScrollEffect; 4]>;

/// Move `offset` to `new`, recording a [`ScrollEffect::ScrollChanged`] if it moved
pub(crate) fn move_offset(offset: &mut ScrollOffset, new: ScrollOffset, effects: &mut Effects) -> bool {
    if *offset == new {
        return false;
    }
    trace!("offset ({}, {}) -> ({}, {})", offset.x, offset.y, new.x, new.y);
    effects.push(ScrollEffect::ScrollChanged { old: *offset, new });
    *offset = new;
    true
}

/// Result of any operation that can move the offset
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollUpdate {
    /// Offset after the operation
    pub offset: ScrollOffset,
    /// A trajectory is still running; keep ticking
    pub animating: bool,
    pub effects: Effects,
}

impl ScrollUpdate {
    /// True if the offset moved during the operation
    pub fn scrolled(&self) -> bool {
        self.effects
            .iter()
            .any(|effect| matches!(effect, ScrollEffect::ScrollChanged { .. }))
    }

    /// Deliver every effect to `host` in the order it was produced
    pub fn dispatch<H: ScrollHost + ?Sized>(&self, host: &mut H) {
        for effect in &self.effects {
            match *effect {
                ScrollEffect::ScrollChanged { new, .. } => host.apply_offset(new),
                ScrollEffect::RequestAnimationTick => host.request_animation_tick(),
                edge_effect => host.on_edge_effect(edge_effect),
            }
        }
    }
}

/// Callbacks a host view implements to receive scroll effects
pub trait ScrollHost {
    /// Move the visible window to `offset`
    fn apply_offset(&mut self, offset: ScrollOffset);

    /// Schedule another animation frame
    fn request_animation_tick(&mut self);

    /// Edge glow feedback; hosts that draw no glow can ignore it
    fn on_edge_effect(&mut self, _effect: ScrollEffect) {}
}

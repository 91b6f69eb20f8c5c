//! Scroll error types

use thiserror::Error;

use crate::events::PointerId;

/// Recoverable conditions reported by the gesture machine
///
/// None of these are fatal. The offending event is skipped and the gesture
/// state is left exactly as it was.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollError {
    /// An event referenced a pointer the current gesture is not tracking
    #[error("pointer {0} is not part of the current gesture")]
    UnknownPointer(PointerId),

    /// A move or up arrived while no gesture is tracking any pointer
    #[error("no active pointer")]
    NoActivePointer,
}

/// Result type for gesture operations
pub type Result<T> = std::result::Result<T, ScrollError>;

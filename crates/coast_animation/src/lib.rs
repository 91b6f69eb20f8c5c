//! Coast Animation
//!
//! Scroll physics for the coast scroll engine.
//!
//! # Features
//!
//! - **Velocity estimation**: least-squares fit over the most recent pointer samples
//! - **Fling physics**: platform spline deceleration with bounded overshoot
//! - **Spring-back**: cubic ease from an overscrolled offset back into range
//! - **Eased scrolls**: fixed-duration trajectories for programmatic scrolling
//! - **Overscroll clamping**: pure delta limiting with edge-hit reporting

pub mod clamp;
pub mod scroller;
pub mod spline;
pub mod velocity;

pub use clamp::{AxisClamp, OverScrollResult, OverscrollClamp};
pub use coast_core::Easing;
pub use scroller::{ScrollBounds, Scroller, Trajectory, TrajectoryKind};
pub use spline::FlingSpline;
pub use velocity::VelocityEstimator;

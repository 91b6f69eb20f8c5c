//! Easing curves for fixed-duration scroll animations

use serde::{Deserialize, Serialize};

/// Scale applied to progress before the viscous-fluid curve is evaluated
const VISCOUS_FLUID_SCALE: f32 = 8.0;

/// `1 / e`, the value of the viscous curve at the knee
const VISCOUS_KNEE: f32 = 0.367_879_44;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseInOutCubic,
    /// The classic scroller curve: exponential acceleration followed by a
    /// long viscous tail
    #[default]
    ViscousFluid,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::ViscousFluid => viscous_fluid(t),
        }
    }
}

fn viscous_raw(t: f32) -> f32 {
    let x = t * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        VISCOUS_KNEE + (1.0 - (1.0 - x).exp()) * (1.0 - VISCOUS_KNEE)
    }
}

fn viscous_fluid(t: f32) -> f32 {
    let normalize = 1.0 / viscous_raw(1.0);
    let offset = 1.0 - normalize * viscous_raw(1.0);
    let eased = normalize * viscous_raw(t) + offset;
    if eased > 0.0 {
        eased
    } else {
        0.0
    }
}

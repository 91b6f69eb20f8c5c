//! Fling deceleration spline
//!
//! A fling's travel distance and duration come from the platform spline: a
//! cubic tension curve sampled into position and time tables, scaled by a
//! physical coefficient derived from screen density and friction.

use std::sync::OnceLock;

/// Inflexion point of the tension curve
const INFLEXION: f64 = 0.35;
const START_TENSION: f64 = 0.5;
const END_TENSION: f64 = 1.0;
const P1: f64 = START_TENSION * INFLEXION;
const P2: f64 = 1.0 - END_TENSION * (1.0 - INFLEXION);

/// Number of samples in the lookup tables
pub(crate) const NB_SAMPLES: usize = 100;

/// Standard gravity, m/s^2
const GRAVITY_EARTH: f64 = 9.80665;
const INCHES_PER_METER: f64 = 39.37;

/// Empirical tuning factor applied to the physical coefficient
const PHYSICAL_TUNING: f64 = 0.84;

/// Acceleration (px/s^2) used for ballistic overshoot and spring-back
pub const GRAVITY: f32 = 2000.0;

/// Default friction of a fling
pub const SCROLL_FRICTION: f32 = 0.015;

fn deceleration_rate() -> f64 {
    0.78f64.ln() / 0.9f64.ln()
}

struct SplineTables {
    position: [f32; NB_SAMPLES + 1],
    time: [f32; NB_SAMPLES + 1],
}

fn tables() -> &'static SplineTables {
    static TABLES: OnceLock<SplineTables> = OnceLock::new();
    TABLES.get_or_init(build_tables)
}

/// Invert the tension curve by bisection for each sample
fn build_tables() -> SplineTables {
    let mut position = [0.0f32; NB_SAMPLES + 1];
    let mut time = [0.0f32; NB_SAMPLES + 1];

    let mut x_min = 0.0f64;
    let mut y_min = 0.0f64;
    for i in 0..NB_SAMPLES {
        let alpha = i as f64 / NB_SAMPLES as f64;

        let mut x_max = 1.0f64;
        let (x, coef) = loop {
            let x = x_min + (x_max - x_min) / 2.0;
            let coef = 3.0 * x * (1.0 - x);
            let tx = coef * ((1.0 - x) * P1 + x * P2) + x * x * x;
            if (tx - alpha).abs() < 1e-5 || x_max - x_min < 1e-12 {
                break (x, coef);
            }
            if tx > alpha {
                x_max = x;
            } else {
                x_min = x;
            }
        };
        position[i] = (coef * ((1.0 - x) * START_TENSION + x) + x * x * x) as f32;

        let mut y_max = 1.0f64;
        let (y, coef) = loop {
            let y = y_min + (y_max - y_min) / 2.0;
            let coef = 3.0 * y * (1.0 - y);
            let dy = coef * ((1.0 - y) * START_TENSION + y) + y * y * y;
            if (dy - alpha).abs() < 1e-5 || y_max - y_min < 1e-12 {
                break (y, coef);
            }
            if dy > alpha {
                y_max = y;
            } else {
                y_min = y;
            }
        };
        time[i] = (coef * ((1.0 - y) * P1 + y * P2) + y * y * y) as f32;
    }
    position[NB_SAMPLES] = 1.0;
    time[NB_SAMPLES] = 1.0;

    SplineTables { position, time }
}

/// Spline parameters for one density and friction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingSpline {
    friction: f64,
    physical_coeff: f64,
}

impl Default for FlingSpline {
    fn default() -> Self {
        Self::new(1.0, SCROLL_FRICTION)
    }
}

impl FlingSpline {
    pub fn new(density: f32, friction: f32) -> Self {
        let ppi = density as f64 * 160.0;
        Self {
            friction: friction as f64,
            physical_coeff: GRAVITY_EARTH * INCHES_PER_METER * ppi * PHYSICAL_TUNING,
        }
    }

    fn deceleration(&self, velocity: f32) -> f64 {
        (INFLEXION * velocity.abs() as f64 / (self.friction * self.physical_coeff)).ln()
    }

    /// Total distance in pixels a fling at `velocity` (px/s) travels
    pub fn distance(&self, velocity: f32) -> f64 {
        if velocity == 0.0 || !velocity.is_finite() {
            return 0.0;
        }
        let rate = deceleration_rate();
        let l = self.deceleration(velocity);
        self.friction * self.physical_coeff * (rate / (rate - 1.0) * l).exp()
    }

    /// Time in milliseconds a fling at `velocity` (px/s) takes to stop
    pub fn duration_ms(&self, velocity: f32) -> i64 {
        if velocity == 0.0 || !velocity.is_finite() {
            return 0;
        }
        let l = self.deceleration(velocity);
        (1000.0 * (l / (deceleration_rate() - 1.0)).exp()) as i64
    }
}

/// Distance and velocity coefficients at normalized time `t`
///
/// The distance coefficient runs from 0 to 1; the velocity coefficient is its
/// derivative with respect to `t`.
pub(crate) fn sample_position(t: f32) -> (f32, f32) {
    let t = t.clamp(0.0, 1.0);
    let index = (NB_SAMPLES as f32 * t) as usize;
    if index >= NB_SAMPLES {
        return (1.0, 0.0);
    }
    let table = &tables().position;
    let t_inf = index as f32 / NB_SAMPLES as f32;
    let t_sup = (index + 1) as f32 / NB_SAMPLES as f32;
    let d_inf = table[index];
    let d_sup = table[index + 1];
    let velocity = (d_sup - d_inf) / (t_sup - t_inf);
    (d_inf + (t - t_inf) * velocity, velocity)
}

/// Fraction of the full duration needed to cover fraction `x` of the distance
pub(crate) fn time_fraction(x: f32) -> f32 {
    let x = x.abs();
    let index = (NB_SAMPLES as f32 * x) as usize;
    if index >= NB_SAMPLES {
        return 1.0;
    }
    let table = &tables().time;
    let x_inf = index as f32 / NB_SAMPLES as f32;
    let x_sup = (index + 1) as f32 / NB_SAMPLES as f32;
    let t_inf = table[index];
    let t_sup = table[index + 1];
    t_inf + (x - x_inf) / (x_sup - x_inf) * (t_sup - t_inf)
}

//! Pointer velocity estimation
//!
//! Samples are kept for a short retention window. The estimate is the slope
//! of an unweighted least-squares line through the most recent samples on
//! each axis, so it is linear in displacement: twice the travel over the same
//! timestamps gives twice the velocity.

use std::collections::VecDeque;

use tracing::{trace, warn};

/// Samples older than this (relative to the newest) are discarded
pub const RETENTION_MS: i64 = 1000;

/// Only samples this close to the newest one contribute to the estimate
const HORIZON_MS: i64 = 100;

/// A gap this long between consecutive samples means the pointer stopped
const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, PartialEq)]
struct PointerSample {
    x: f32,
    y: f32,
    time_ms: i64,
}

/// Two-axis velocity estimator for a single gesture
#[derive(Clone, Debug, Default)]
pub struct VelocityEstimator {
    samples: VecDeque<PointerSample>,
}

impl VelocityEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, dropping history older than the retention window
    ///
    /// A sample timestamped before the newest retained one is ignored.
    pub fn add_sample(&mut self, x: f32, y: f32, time_ms: i64) {
        if let Some(newest) = self.samples.back() {
            if time_ms < newest.time_ms {
                warn!(
                    "velocity sample at {}ms is older than newest {}ms, ignoring",
                    time_ms, newest.time_ms
                );
                return;
            }
        }

        self.samples.push_back(PointerSample { x, y, time_ms });
        while let Some(oldest) = self.samples.front() {
            if time_ms - oldest.time_ms > RETENTION_MS {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Forget all samples
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Estimate `(vx, vy)` in pixels per `units_ms` milliseconds
    ///
    /// Pass `1000` for pixels per second. Each component is clamped to
    /// `±max_velocity`. Returns `(0, 0)` with fewer than two usable samples.
    pub fn estimate_velocity(&self, units_ms: f32, max_velocity: f32) -> (f32, f32) {
        let Some(newest) = self.samples.back().copied() else {
            return (0.0, 0.0);
        };

        // Walk backwards from the newest sample, stopping at the horizon or at
        // the first gap long enough to mean the finger rested
        let mut window = 0usize;
        let mut later_time = newest.time_ms;
        for sample in self.samples.iter().rev() {
            if newest.time_ms - sample.time_ms > HORIZON_MS
                || later_time - sample.time_ms > ASSUME_STOPPED_MS
            {
                break;
            }
            later_time = sample.time_ms;
            window += 1;
        }

        if window < 2 {
            return (0.0, 0.0);
        }

        let recent = self.samples.iter().rev().take(window);
        let (slope_x, slope_y) = least_squares_slope(recent, newest.time_ms, window);

        let max = max_velocity.abs();
        let vx = (slope_x * units_ms).clamp(-max, max);
        let vy = (slope_y * units_ms).clamp(-max, max);
        trace!("velocity over {} samples: ({:.1}, {:.1})", window, vx, vy);
        (vx, vy)
    }
}

/// Slope (units per millisecond) of the best-fit line through the samples
fn least_squares_slope<'a>(
    samples: impl Iterator<Item = &'a PointerSample>,
    origin_ms: i64,
    count: usize,
) -> (f32, f32) {
    let n = count as f64;
    let mut sum_t = 0.0f64;
    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    let mut sum_tt = 0.0f64;
    let mut sum_tx = 0.0f64;
    let mut sum_ty = 0.0f64;

    for sample in samples {
        let t = (sample.time_ms - origin_ms) as f64;
        let x = sample.x as f64;
        let y = sample.y as f64;
        sum_t += t;
        sum_x += x;
        sum_y += y;
        sum_tt += t * t;
        sum_tx += t * x;
        sum_ty += t * y;
    }

    let denominator = n * sum_tt - sum_t * sum_t;
    if denominator.abs() < f64::EPSILON {
        // Every sample shares one timestamp
        return (0.0, 0.0);
    }

    let slope_x = (n * sum_tx - sum_t * sum_x) / denominator;
    let slope_y = (n * sum_ty - sum_t * sum_y) / denominator;
    (slope_x as f32, slope_y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(estimator: &mut VelocityEstimator, points: &[(f32, f32, i64)]) {
        for &(x, y, t) in points {
            estimator.add_sample(x, y, t);
        }
    }

    #[test]
    fn test_needs_two_samples() {
        let mut estimator = VelocityEstimator::new();
        assert_eq!(estimator.estimate_velocity(1000.0, 8000.0), (0.0, 0.0));
        estimator.add_sample(10.0, 10.0, 0);
        assert_eq!(estimator.estimate_velocity(1000.0, 8000.0), (0.0, 0.0));
    }

    #[test]
    fn test_constant_motion() {
        let mut estimator = VelocityEstimator::new();
        // 2 px/ms down, 1 px/ms left
        for i in 0..6 {
            estimator.add_sample(100.0 - i as f32 * 10.0, i as f32 * 20.0, i * 10);
        }
        let (vx, vy) = estimator.estimate_velocity(1000.0, 8000.0);
        assert!((vx + 1000.0).abs() < 0.5, "vx = {vx}");
        assert!((vy - 2000.0).abs() < 0.5, "vy = {vy}");
    }

    #[test]
    fn test_units_scale_result() {
        let mut estimator = VelocityEstimator::new();
        feed(&mut estimator, &[(0.0, 0.0, 0), (0.0, 10.0, 10), (0.0, 20.0, 20)]);
        let (_, per_second) = estimator.estimate_velocity(1000.0, f32::MAX);
        let (_, per_ms) = estimator.estimate_velocity(1.0, f32::MAX);
        assert!((per_second - 1000.0).abs() < 0.01);
        assert!((per_ms - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_clamped_to_max() {
        let mut estimator = VelocityEstimator::new();
        feed(&mut estimator, &[(0.0, 0.0, 0), (0.0, -500.0, 10)]);
        let (vx, vy) = estimator.estimate_velocity(1000.0, 8000.0);
        assert_eq!(vx, 0.0);
        assert_eq!(vy, -8000.0);
    }

    #[test]
    fn test_doubling_displacement_doubles_velocity() {
        let mut slow = VelocityEstimator::new();
        let mut fast = VelocityEstimator::new();
        let times = [0, 8, 17, 25, 33];
        let offsets = [0.0, 3.0, 9.0, 14.0, 22.0];
        for (t, d) in times.iter().zip(offsets) {
            slow.add_sample(0.0, d, *t);
            fast.add_sample(0.0, 2.0 * d, *t);
        }
        let (_, vs) = slow.estimate_velocity(1000.0, f32::MAX);
        let (_, vf) = fast.estimate_velocity(1000.0, f32::MAX);
        assert!(vs > 0.0);
        assert!((vf - 2.0 * vs).abs() < 1e-2 * vs.abs());
    }

    #[test]
    fn test_pause_before_release_means_no_velocity() {
        let mut estimator = VelocityEstimator::new();
        feed(
            &mut estimator,
            &[(0.0, 0.0, 0), (0.0, 50.0, 10), (0.0, 100.0, 20), (0.0, 100.0, 200)],
        );
        assert_eq!(estimator.estimate_velocity(1000.0, 8000.0), (0.0, 0.0));
    }

    #[test]
    fn test_retention_window_drops_old_samples() {
        let mut estimator = VelocityEstimator::new();
        estimator.add_sample(0.0, 0.0, 0);
        estimator.add_sample(0.0, 1.0, 500);
        estimator.add_sample(0.0, 2.0, 1200);
        assert_eq!(estimator.len(), 2);
    }

    #[test]
    fn test_out_of_order_sample_ignored() {
        let mut estimator = VelocityEstimator::new();
        estimator.add_sample(0.0, 0.0, 100);
        estimator.add_sample(0.0, 10.0, 90);
        assert_eq!(estimator.len(), 1);
    }

    #[test]
    fn test_shared_timestamp_gives_zero() {
        let mut estimator = VelocityEstimator::new();
        feed(&mut estimator, &[(0.0, 0.0, 5), (10.0, 10.0, 5)]);
        assert_eq!(estimator.estimate_velocity(1000.0, 8000.0), (0.0, 0.0));
    }

    #[test]
    fn test_reset_clears_history() {
        let mut estimator = VelocityEstimator::new();
        feed(&mut estimator, &[(0.0, 0.0, 0), (0.0, 10.0, 10)]);
        estimator.reset();
        assert!(estimator.is_empty());
        assert_eq!(estimator.estimate_velocity(1000.0, 8000.0), (0.0, 0.0));
    }
}

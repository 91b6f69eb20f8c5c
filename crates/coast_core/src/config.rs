//! Scroll container configuration
//!
//! Device-derived constants the host passes in. Every field has a serde
//! default, so a TOML file only needs to name the values it overrides:
//!
//! ```toml
//! touch_slop = 16
//! over_scroll_mode = "always"
//! overscroll_distance = 24
//! vertical_scroll_factor = 64.0
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::easing::Easing;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML source could not be parsed
    #[error("failed to parse scroll config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value was parsed but is out of range or inconsistent
    #[error("invalid scroll config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// When the offset may be pushed past the content bounds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverScrollMode {
    /// Always allow overscroll, even when the content fits
    Always,
    /// Allow overscroll only when the content is larger than the viewport
    #[default]
    IfContentScrolls,
    /// Never overscroll
    Never,
}

/// Scroll behaviour constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Distance in pixels a pointer must travel before a drag starts
    #[serde(default = "default_touch_slop")]
    pub touch_slop: i32,
    /// Slowest release velocity (px/s) that starts a fling
    #[serde(default = "default_min_fling_velocity")]
    pub min_fling_velocity: f32,
    /// Release velocities are clamped to this magnitude (px/s)
    #[serde(default = "default_max_fling_velocity")]
    pub max_fling_velocity: f32,
    /// How far a drag may push past an edge
    #[serde(default)]
    pub overscroll_distance: i32,
    /// How far a fling may overshoot an edge before springing back
    #[serde(default = "default_overfling_distance")]
    pub overfling_distance: i32,
    #[serde(default)]
    pub over_scroll_mode: OverScrollMode,
    /// Programmatic and keyboard scrolls animate instead of jumping
    #[serde(default = "default_true")]
    pub smooth_scrolling_enabled: bool,
    /// Deceleration friction of the fling spline
    #[serde(default = "default_fling_friction")]
    pub fling_friction: f32,
    /// Display density (1.0 = 160 dpi)
    #[serde(default = "default_density")]
    pub density: f32,
    #[serde(default = "default_smooth_scroll_duration_ms")]
    pub smooth_scroll_duration_ms: u32,
    #[serde(default)]
    pub smooth_scroll_easing: Easing,
    /// Pixels per vertical wheel step; `None` leaves wheel events to the host
    #[serde(default)]
    pub vertical_scroll_factor: Option<f32>,
    /// Pixels per horizontal wheel step
    #[serde(default)]
    pub horizontal_scroll_factor: Option<f32>,
    /// Margin kept clear at the top and bottom when revealing a rect
    #[serde(default)]
    pub vertical_fading_edge: i32,
    /// Margin kept clear at the left and right when revealing a rect
    #[serde(default)]
    pub horizontal_fading_edge: i32,
}

fn default_touch_slop() -> i32 {
    8
}

fn default_min_fling_velocity() -> f32 {
    50.0
}

fn default_max_fling_velocity() -> f32 {
    8000.0
}

fn default_overfling_distance() -> i32 {
    6
}

fn default_true() -> bool {
    true
}

fn default_fling_friction() -> f32 {
    0.015
}

fn default_density() -> f32 {
    1.0
}

fn default_smooth_scroll_duration_ms() -> u32 {
    250
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            touch_slop: default_touch_slop(),
            min_fling_velocity: default_min_fling_velocity(),
            max_fling_velocity: default_max_fling_velocity(),
            overscroll_distance: 0,
            overfling_distance: default_overfling_distance(),
            over_scroll_mode: OverScrollMode::default(),
            smooth_scrolling_enabled: true,
            fling_friction: default_fling_friction(),
            density: default_density(),
            smooth_scroll_duration_ms: default_smooth_scroll_duration_ms(),
            smooth_scroll_easing: Easing::default(),
            vertical_scroll_factor: None,
            horizontal_scroll_factor: None,
            vertical_fading_edge: 0,
            horizontal_fading_edge: 0,
        }
    }
}

impl ScrollConfig {
    /// Defaults with the dp-derived distances and velocities scaled to `density`
    pub fn for_density(density: f32) -> Self {
        let base = Self::default();
        let scale_px = |dp: i32| (dp as f32 * density + 0.5) as i32;
        Self {
            touch_slop: scale_px(base.touch_slop),
            min_fling_velocity: base.min_fling_velocity * density,
            max_fling_velocity: base.max_fling_velocity * density,
            overscroll_distance: scale_px(base.overscroll_distance),
            overfling_distance: scale_px(base.overfling_distance),
            density,
            ..base
        }
    }

    /// Parse a TOML document and validate the result
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ScrollConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the physics cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.touch_slop < 0 {
            return Err(invalid("touch_slop", "must not be negative"));
        }
        if self.overscroll_distance < 0 {
            return Err(invalid("overscroll_distance", "must not be negative"));
        }
        if self.overfling_distance < 0 {
            return Err(invalid("overfling_distance", "must not be negative"));
        }
        if !(self.min_fling_velocity >= 0.0) {
            return Err(invalid("min_fling_velocity", "must not be negative"));
        }
        if !(self.max_fling_velocity >= self.min_fling_velocity) {
            return Err(invalid(
                "max_fling_velocity",
                format!(
                    "{} is below min_fling_velocity {}",
                    self.max_fling_velocity, self.min_fling_velocity
                ),
            ));
        }
        if !(self.fling_friction > 0.0) {
            return Err(invalid("fling_friction", "must be positive"));
        }
        if !(self.density > 0.0) {
            return Err(invalid("density", "must be positive"));
        }
        if self.vertical_fading_edge < 0 || self.horizontal_fading_edge < 0 {
            return Err(invalid("fading_edge", "must not be negative"));
        }
        Ok(())
    }

    /// Whether overscroll is allowed given the current scroll ranges
    pub fn can_overscroll(&self, range_x: i32, range_y: i32) -> bool {
        match self.over_scroll_mode {
            OverScrollMode::Always => true,
            OverScrollMode::IfContentScrolls => range_x > 0 || range_y > 0,
            OverScrollMode::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScrollConfig::default();
        assert_eq!(config.touch_slop, 8);
        assert_eq!(config.min_fling_velocity, 50.0);
        assert_eq!(config.max_fling_velocity, 8000.0);
        assert_eq!(config.overscroll_distance, 0);
        assert_eq!(config.overfling_distance, 6);
        assert_eq!(config.smooth_scroll_easing, Easing::ViscousFluid);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_for_density_scales_distances() {
        let config = ScrollConfig::for_density(2.0);
        assert_eq!(config.touch_slop, 16);
        assert_eq!(config.overfling_distance, 12);
        assert_eq!(config.max_fling_velocity, 16000.0);
        assert_eq!(config.fling_friction, 0.015);
    }

    #[test]
    fn test_from_toml_overrides() {
        let config = ScrollConfig::from_toml_str(
            r#"
            touch_slop = 12
            over_scroll_mode = "always"
            vertical_scroll_factor = 64.0
            smooth_scroll_easing = "ease-out-cubic"
            "#,
        )
        .unwrap();
        assert_eq!(config.touch_slop, 12);
        assert_eq!(config.over_scroll_mode, OverScrollMode::Always);
        assert_eq!(config.vertical_scroll_factor, Some(64.0));
        assert_eq!(config.horizontal_scroll_factor, None);
        assert_eq!(config.smooth_scroll_easing, Easing::EaseOutCubic);
        assert_eq!(config.min_fling_velocity, 50.0);
    }

    #[test]
    fn test_validate_rejects_inverted_fling_range() {
        let err = ScrollConfig::from_toml_str("min_fling_velocity = 900.0\nmax_fling_velocity = 100.0")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "max_fling_velocity",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = ScrollConfig::from_toml_str("touch_slop = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_can_overscroll_modes() {
        let mut config = ScrollConfig::default();
        assert!(!config.can_overscroll(0, 0));
        assert!(config.can_overscroll(0, 10));
        config.over_scroll_mode = OverScrollMode::Always;
        assert!(config.can_overscroll(0, 0));
        config.over_scroll_mode = OverScrollMode::Never;
        assert!(!config.can_overscroll(100, 100));
    }
}

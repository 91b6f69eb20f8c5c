//! Integration tests for scroll configuration loading
//!
//! These tests verify that:
//! - A sparse TOML file fills every missing field with its default
//! - The config survives a JSON round trip for hosts that persist it
//! - Density scaling produces a config that still validates

use coast_core::{ConfigError, Easing, OverScrollMode, ScrollConfig};

/// A device profile written by a host overrides only what it names
#[test]
fn test_device_profile_from_toml() {
    let config = ScrollConfig::from_toml_str(
        r#"
        touch_slop = 24
        min_fling_velocity = 150.0
        max_fling_velocity = 24000.0
        overscroll_distance = 0
        overfling_distance = 18
        over_scroll_mode = "if-content-scrolls"
        density = 3.0
        smooth_scrolling_enabled = false
        vertical_fading_edge = 30
        "#,
    )
    .unwrap();

    assert_eq!(config.touch_slop, 24);
    assert_eq!(config.overfling_distance, 18);
    assert_eq!(config.over_scroll_mode, OverScrollMode::IfContentScrolls);
    assert!(!config.smooth_scrolling_enabled);
    assert_eq!(config.vertical_fading_edge, 30);
    assert_eq!(config.horizontal_fading_edge, 0);
    assert_eq!(config.smooth_scroll_duration_ms, 250);
    assert_eq!(config.smooth_scroll_easing, Easing::ViscousFluid);
}

/// An empty document is the default config
#[test]
fn test_empty_toml_is_default() {
    let config = ScrollConfig::from_toml_str("").unwrap();
    assert_eq!(config, ScrollConfig::default());
}

/// Config serialized by one host can be read back by another
#[test]
fn test_json_round_trip() {
    let mut config = ScrollConfig::for_density(1.5);
    config.vertical_scroll_factor = Some(48.0);
    config.over_scroll_mode = OverScrollMode::Never;

    let json = serde_json::to_string(&config).unwrap();
    let restored: ScrollConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}

/// Scaled configs stay consistent
#[test]
fn test_density_scaled_configs_validate() {
    for density in [0.75, 1.0, 1.5, 2.0, 3.0, 4.0] {
        assert!(ScrollConfig::for_density(density).validate().is_ok());
    }
}

/// Non-positive physics constants are rejected with the field name
#[test]
fn test_invalid_friction_is_rejected() {
    let err = ScrollConfig::from_toml_str("fling_friction = 0.0").unwrap_err();
    match err {
        ConfigError::Invalid { field, .. } => assert_eq!(field, "fling_friction"),
        other => panic!("unexpected error: {other}"),
    }
}

// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use depth_view::Config;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(
        config.min_depth_m <= config.max_depth_m,
        "Default range must be ordered"
    );
    assert!(!config.quantize, "Quantization should be off by default");
}

#[test]
fn test_config_json_roundtrip() {
    let config = Config::default();
    let json = serde_json::to_string(&config).unwrap();
    let restored: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(config, restored);
}

#[test]
fn test_hand_edited_range_is_sanitized() {
    // A config file edited to an out-of-order window must still produce
    // a valid range when read through depth_range()
    let config = Config {
        min_depth_m: 5.0,
        max_depth_m: 3.0,
        ..Config::default()
    };
    let range = config.depth_range();
    assert_eq!(range.min_m, 5.0);
    assert_eq!(range.max_m, 5.0);
}

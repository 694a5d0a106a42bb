// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants

use depth_view::constants::{
    DEFAULT_MAX_DEPTH_M, DEFAULT_MIN_DEPTH_M, RANGE_STEP_M, SYNTHETIC_RESOLUTIONS,
};
use depth_view::shaders::depth_view::{
    DEPTH_COLORMAP_BANDS, DEPTH_RANGE_CEILING_M, DEPTH_RANGE_FLOOR_M, RANGE_EPSILON_M,
};

#[test]
fn test_range_window_bounds() {
    assert_eq!(DEPTH_RANGE_FLOOR_M, 0.0);
    assert_eq!(DEPTH_RANGE_CEILING_M, 8.0);
}

#[test]
fn test_defaults_inside_window() {
    assert!(DEFAULT_MIN_DEPTH_M >= DEPTH_RANGE_FLOOR_M);
    assert!(DEFAULT_MAX_DEPTH_M <= DEPTH_RANGE_CEILING_M);
    assert!(DEFAULT_MIN_DEPTH_M <= DEFAULT_MAX_DEPTH_M);
}

#[test]
fn test_epsilon_is_small_and_positive() {
    assert!(RANGE_EPSILON_M > 0.0);
    // Far below anything a range keybinding step can produce
    assert!(RANGE_EPSILON_M < RANGE_STEP_M);
}

#[test]
fn test_colormap_bands() {
    assert!(DEPTH_COLORMAP_BANDS > 1.0);
}

#[test]
fn test_synthetic_resolutions_descend() {
    // The resolution cycle exercises reallocation; make sure each step
    // actually changes the frame size
    for pair in SYNTHETIC_RESOLUTIONS.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Default visualization window on startup (meters)
pub const DEFAULT_MIN_DEPTH_M: f32 = 0.0;
pub const DEFAULT_MAX_DEPTH_M: f32 = 8.0;

/// Increment applied by the viewer's range keybindings (meters)
pub const RANGE_STEP_M: f32 = 0.1;

/// Target interval between viewer ticks (~60 Hz input polling)
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Default synthetic source resolution
pub const SYNTHETIC_WIDTH: u32 = 640;
pub const SYNTHETIC_HEIGHT: u32 = 480;

/// Resolutions the synthetic source cycles through ('r' in the viewer)
pub const SYNTHETIC_RESOLUTIONS: [(u32, u32); 3] = [(640, 480), (320, 240), (160, 120)];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_ordered() {
        assert!(DEFAULT_MIN_DEPTH_M <= DEFAULT_MAX_DEPTH_M);
        assert!(DEFAULT_MIN_DEPTH_M >= 0.0);
    }

    #[test]
    fn test_synthetic_resolutions_nonzero() {
        for (w, h) in SYNTHETIC_RESOLUTIONS {
            assert!(w > 0 && h > 0);
        }
    }
}

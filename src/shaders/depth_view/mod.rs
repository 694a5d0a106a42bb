// SPDX-License-Identifier: GPL-3.0-only

//! Depth range visualization
//!
//! Turns single-channel f32 depth frames (meters) into RGBA frames by
//! mapping each sample through a user-adjustable [min, max] window:
//! - `processor`: the GPU pipeline (upload + compute dispatch + readback)
//! - `visualization`: the identical mapping on the CPU
//! - `range`: the window parameters and their cross-thread channel

mod constants;
mod processor;
mod range;
mod visualization;

pub use constants::*;
pub use processor::{DepthViewProcessor, ViewFrame, get_depth_view_processor, render_depth_view};
pub use range::{DepthRange, DepthRangeChannel};
pub use visualization::{ColorMode, depth_to_rgba, map_depth};

/// Visualization shader source
pub const VISUALIZE_SHADER: &str = include_str!("visualize.wgsl");

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Global visualization settings
/// These are updated from the input-handling thread and read once per
/// frame by the render loop; the range channel snapshot is tear-free.
static DEPTH_RANGE: DepthRangeChannel =
    DepthRangeChannel::new(DEPTH_RANGE_FLOOR_M, DEPTH_RANGE_CEILING_M);
static COLOR_MODE_TURBO: AtomicBool = AtomicBool::new(false);
static QUANTIZE_BANDS: AtomicU32 = AtomicU32::new(0);

/// Replace the visualized depth window (clamped, min <= max)
pub fn set_depth_range(min_m: f32, max_m: f32) {
    DEPTH_RANGE.set(min_m, max_m);
}

/// Move only the near bound; drags the far bound along when crossed
pub fn set_min_depth(min_m: f32) {
    DEPTH_RANGE.set_min(min_m);
}

/// Move only the far bound; drags the near bound along when crossed
pub fn set_max_depth(max_m: f32) {
    DEPTH_RANGE.set_max(max_m);
}

/// Current depth window snapshot
pub fn depth_range() -> DepthRange {
    DEPTH_RANGE.get()
}

/// Set the colorization mode
pub fn set_color_mode(mode: ColorMode) {
    COLOR_MODE_TURBO.store(mode == ColorMode::Turbo, Ordering::Relaxed);
}

/// Get the colorization mode
pub fn color_mode() -> ColorMode {
    if COLOR_MODE_TURBO.load(Ordering::Relaxed) {
        ColorMode::Turbo
    } else {
        ColorMode::Grayscale
    }
}

/// Enable or disable band quantization
pub fn set_quantize_enabled(enabled: bool) {
    let bands = if enabled { DEPTH_COLORMAP_BANDS as u32 } else { 0 };
    QUANTIZE_BANDS.store(bands, Ordering::Relaxed);
}

/// Current band count for the shader (0.0 = quantization off)
pub fn quantize_bands() -> f32 {
    QUANTIZE_BANDS.load(Ordering::Relaxed) as f32
}

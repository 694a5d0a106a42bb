// SPDX-License-Identifier: GPL-3.0-only

//! CPU reference of the range mapping
//!
//! The exact mapping the WGSL kernel applies, kept on the CPU for:
//! - the `snapshot --cpu` path
//! - property tests of the mapping contract
//!
//! Both implementations must stay in sync with the constants module.

use super::constants::{DEPTH_INVALID_M, RANGE_EPSILON_M};
use super::range::DepthRange;
use serde::{Deserialize, Serialize};

/// How a mapped intensity becomes a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    /// Intensity written directly to all channels (near = dark)
    #[default]
    Grayscale,
    /// Turbo colormap lookup (near = blue, far = red)
    Turbo,
}

impl ColorMode {
    /// Flag value passed to the shader uniform
    pub fn shader_flag(&self) -> u32 {
        match self {
            ColorMode::Grayscale => 0,
            ColorMode::Turbo => 1,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ColorMode::Grayscale => "grayscale",
            ColorMode::Turbo => "turbo",
        }
    }
}

/// Map one depth sample (meters) through the range window into [0, 1].
///
/// Invalid samples (<= 0 or NaN) map to 0, the near intensity. The
/// denominator is clamped to [`RANGE_EPSILON_M`], so a degenerate window
/// (min == max) yields 0 at or below min and 1 above - never NaN or Inf.
#[inline]
pub fn map_depth(d: f32, range: DepthRange) -> f32 {
    // NaN fails the comparison and lands in the invalid branch
    if !(d > DEPTH_INVALID_M) {
        return 0.0;
    }
    ((d - range.min_m) / range.span_m().max(RANGE_EPSILON_M)).clamp(0.0, 1.0)
}

/// Turbo colormap: perceptually uniform rainbow (blue=near, red=far)
///
/// Based on: https://ai.googleblog.com/2019/08/turbo-improved-rainbow-colormap-for.html
/// Simplified version with polynomial approximation.
#[inline]
fn turbo(t: f32) -> [u8; 4] {
    let r = (0.13572138
        + t * (4.6153926 + t * (-42.66032 + t * (132.13108 + t * (-152.54825 + t * 59.28144)))))
        .clamp(0.0, 1.0);
    let g = (0.09140261
        + t * (2.19418 + t * (4.84296 + t * (-14.18503 + t * (4.27805 + t * 2.53377)))))
        .clamp(0.0, 1.0);
    let b = (0.1066733
        + t * (12.64194 + t * (-60.58204 + t * (109.99648 + t * (-82.52904 + t * 20.43388)))))
        .clamp(0.0, 1.0);
    [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8, 255]
}

/// Quantize an intensity into discrete bands (0.0 bands = passthrough)
#[inline]
fn quantize(t: f32, bands: f32) -> f32 {
    if bands > 0.0 {
        ((t * bands).floor() / bands).min(1.0)
    } else {
        t
    }
}

/// Colorize a depth buffer (meters) into RGBA on the CPU.
///
/// `stride` is in samples per row. `bands` of 0.0 disables quantization;
/// pass `DEPTH_COLORMAP_BANDS` for the banded mode.
pub fn depth_to_rgba(
    samples: &[f32],
    width: u32,
    height: u32,
    stride: u32,
    range: DepthRange,
    mode: ColorMode,
    bands: f32,
) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);

    for y in 0..height as usize {
        let row = &samples[y * stride as usize..y * stride as usize + width as usize];
        for &d in row {
            let t = quantize(map_depth(d, range), bands);
            match mode {
                ColorMode::Grayscale => {
                    let gray = (t * 255.0) as u8;
                    rgba.extend_from_slice(&[gray, gray, gray, 255]);
                }
                ColorMode::Turbo => {
                    rgba.extend_from_slice(&turbo(t));
                }
            }
        }
    }
    rgba
}

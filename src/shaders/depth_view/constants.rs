// SPDX-License-Identifier: GPL-3.0-only

//! Depth visualization constants - Single source of truth
//!
//! Range limits, degenerate-range handling, and colormap tuning values
//! used by both the WGSL kernel and the CPU reference mapping.

/// Lower bound the range window can reach (meters)
pub const DEPTH_RANGE_FLOOR_M: f32 = 0.0;
/// Upper bound the range window can reach (meters)
pub const DEPTH_RANGE_CEILING_M: f32 = 8.0;

/// Smallest denominator used by the range mapping. When min == max the
/// window is degenerate; dividing by this instead keeps the output free
/// of NaN/Inf and collapses the frame to 0 (at or below min) or 1 (above).
/// Must match RANGE_EPSILON in visualize.wgsl.
pub const RANGE_EPSILON_M: f32 = 1e-4;

/// Sentinel for pixels where the sensor had no reading
pub const DEPTH_INVALID_M: f32 = 0.0;

/// Number of quantization bands for the banded visualization mode
pub const DEPTH_COLORMAP_BANDS: f32 = 32.0;

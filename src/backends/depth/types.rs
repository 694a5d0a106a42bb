// SPDX-License-Identifier: GPL-3.0-only
// Shared types for depth source adapters

//! Shared types for depth sources

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Result type for depth source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Depth source errors
#[derive(Debug, Clone)]
pub enum SourceError {
    /// Frame geometry is unusable (zero dimension, stride < width,
    /// sample buffer shorter than stride * height)
    InvalidGeometry(String),
    /// File could not be read or decoded into a depth frame
    DecodeFailed(String),
    /// Pixel layout is not one this adapter understands
    UnsupportedFormat(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::InvalidGeometry(msg) => write!(f, "Invalid frame geometry: {}", msg),
            SourceError::DecodeFailed(msg) => write!(f, "Decode failed: {}", msg),
            SourceError::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}

/// A single depth image produced by a source.
///
/// Samples are row-major `f32` distances in meters. A sample of 0.0, a
/// negative value, or NaN marks a pixel where the sensor had no reading;
/// the visualization maps those to the near color. Frames are immutable
/// once produced and shared by reference counting, so handing one to the
/// upload stage never copies the sample buffer.
#[derive(Debug, Clone)]
pub struct DepthFrame {
    /// Width in samples
    pub width: u32,
    /// Height in rows
    pub height: u32,
    /// Row stride in samples (>= width; rows may carry source padding)
    pub stride: u32,
    /// Row-major depth samples in meters, `stride * height` long
    pub samples: Arc<[f32]>,
    /// When the source produced this frame
    pub captured_at: Instant,
}

impl DepthFrame {
    /// Create a frame, validating its geometry.
    pub fn new(width: u32, height: u32, stride: u32, samples: Arc<[f32]>) -> SourceResult<Self> {
        if width == 0 || height == 0 {
            return Err(SourceError::InvalidGeometry(format!(
                "zero dimension: {}x{}",
                width, height
            )));
        }
        if stride < width {
            return Err(SourceError::InvalidGeometry(format!(
                "stride {} < width {}",
                stride, width
            )));
        }
        let needed = stride as usize * height as usize;
        if samples.len() < needed {
            return Err(SourceError::InvalidGeometry(format!(
                "sample buffer has {} samples, geometry needs {}",
                samples.len(),
                needed
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            samples,
            captured_at: Instant::now(),
        })
    }

    /// Create a tightly-packed frame (stride == width).
    pub fn from_samples(width: u32, height: u32, samples: Vec<f32>) -> SourceResult<Self> {
        Self::new(width, height, width, samples.into())
    }

    /// Depth sample at (x, y) in meters. Out-of-bounds reads clamp to the edge.
    pub fn sample(&self, x: u32, y: u32) -> f32 {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.samples[y as usize * self.stride as usize + x as usize]
    }
}

/// A pollable producer of depth frames.
///
/// `poll_frame` returns the latest frame if one is ready, or `None` when
/// no new data is available this tick. Callers are expected to keep
/// presenting the previously rendered frame in that case.
pub trait DepthSource {
    /// Latest frame, or `None` if nothing new is available
    fn poll_frame(&mut self) -> Option<DepthFrame>;

    /// Current frame dimensions (width, height)
    fn dimensions(&self) -> (u32, u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_geometry_validation() {
        assert!(DepthFrame::from_samples(2, 2, vec![1.0; 4]).is_ok());
        assert!(DepthFrame::from_samples(0, 2, vec![]).is_err());
        assert!(DepthFrame::from_samples(2, 0, vec![]).is_err());
        // Buffer shorter than geometry
        assert!(DepthFrame::from_samples(2, 2, vec![1.0; 3]).is_err());
        // Stride below width
        assert!(DepthFrame::new(4, 2, 2, vec![1.0; 8].into()).is_err());
    }

    #[test]
    fn test_frame_with_padded_stride() {
        // 2x2 image with stride 3: row padding must be skipped by sample()
        let samples = vec![1.0, 2.0, 99.0, 3.0, 4.0, 99.0];
        let frame = DepthFrame::new(2, 2, 3, samples.into()).unwrap();
        assert_eq!(frame.sample(0, 0), 1.0);
        assert_eq!(frame.sample(1, 0), 2.0);
        assert_eq!(frame.sample(0, 1), 3.0);
        assert_eq!(frame.sample(1, 1), 4.0);
    }

    #[test]
    fn test_sample_clamps_to_edge() {
        let frame = DepthFrame::from_samples(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(frame.sample(10, 10), 4.0);
    }

    #[test]
    fn test_frame_sharing_is_zero_copy() {
        let frame = DepthFrame::from_samples(2, 2, vec![1.0; 4]).unwrap();
        let clone = frame.clone();
        assert!(Arc::ptr_eq(&frame.samples, &clone.samples));
    }
}

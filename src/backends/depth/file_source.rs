// SPDX-License-Identifier: GPL-3.0-only

//! File-backed depth frames
//!
//! Decodes still images into depth frames for the snapshot command:
//! - 16-bit grayscale PNG: millimeters, the common export format of
//!   depth sensors (0 stays the invalid sentinel)
//! - 32-bit float EXR: meters, first channel
//! - 8-bit grayscale: mapped linearly onto [0, DEPTH_RANGE_CEILING_M]

use super::types::{DepthFrame, SourceError, SourceResult};
use crate::shaders::depth_view::DEPTH_RANGE_CEILING_M;
use image::DynamicImage;
use std::path::Path;
use tracing::debug;

/// Load a depth frame from an image file
pub fn load_depth_frame(path: &Path) -> SourceResult<DepthFrame> {
    let img = image::open(path)
        .map_err(|e| SourceError::DecodeFailed(format!("{}: {}", path.display(), e)))?;

    let (width, height) = (img.width(), img.height());
    let samples: Vec<f32> = match img {
        DynamicImage::ImageLuma16(buf) => buf
            .into_raw()
            .into_iter()
            .map(|mm| mm as f32 / 1000.0)
            .collect(),
        DynamicImage::ImageLuma8(buf) => buf
            .into_raw()
            .into_iter()
            .map(|v| v as f32 / 255.0 * DEPTH_RANGE_CEILING_M)
            .collect(),
        DynamicImage::ImageRgb32F(buf) => {
            buf.into_raw().chunks_exact(3).map(|px| px[0]).collect()
        }
        DynamicImage::ImageRgba32F(buf) => {
            buf.into_raw().chunks_exact(4).map(|px| px[0]).collect()
        }
        other => {
            return Err(SourceError::UnsupportedFormat(format!(
                "{:?} (expected 8/16-bit grayscale or 32-bit float)",
                other.color()
            )));
        }
    };

    debug!(
        path = %path.display(),
        width,
        height,
        "Loaded depth frame from file"
    );

    DepthFrame::from_samples(width, height, samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_luma16_png_as_millimeters() {
        let dir = std::env::temp_dir().join("depth_view_file_source_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("depth_mm.png");

        // 2x2 frame: 0 (invalid), 500 mm, 4000 mm, 8000 mm
        let img = image::ImageBuffer::<image::Luma<u16>, _>::from_raw(
            2,
            2,
            vec![0u16, 500, 4000, 8000],
        )
        .unwrap();
        img.save(&path).unwrap();

        let frame = load_depth_frame(&path).unwrap();
        assert_eq!((frame.width, frame.height), (2, 2));
        assert_eq!(frame.sample(0, 0), 0.0);
        assert!((frame.sample(1, 0) - 0.5).abs() < 1e-6);
        assert!((frame.sample(0, 1) - 4.0).abs() < 1e-6);
        assert!((frame.sample(1, 1) - 8.0).abs() < 1e-6);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let err = load_depth_frame(Path::new("/nonexistent/depth.png")).unwrap_err();
        assert!(matches!(err, SourceError::DecodeFailed(_)));
    }
}

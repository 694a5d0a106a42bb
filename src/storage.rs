// SPDX-License-Identifier: GPL-3.0-only

//! Storage utilities for saving rendered snapshots

use crate::errors::{AppError, AppResult};
use crate::shaders::depth_view::ViewFrame;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory snapshots are written to (~/Pictures/depth-view, or the
/// home directory when no pictures directory is configured)
pub fn snapshot_directory() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("depth-view")
}

/// Save a rendered frame as PNG at an explicit path
pub fn save_view_frame_to(frame: &ViewFrame, path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let img: image::RgbaImage =
        image::ImageBuffer::from_raw(frame.width, frame.height, frame.rgba.clone())
            .ok_or_else(|| AppError::Storage("Frame buffer does not match dimensions".into()))?;
    img.save(path)
        .map_err(|e| AppError::Storage(format!("{}: {}", path.display(), e)))?;

    info!(path = %path.display(), "Snapshot saved");
    Ok(())
}

/// Save a rendered frame into the snapshot directory with a timestamped name
pub fn save_view_frame(frame: &ViewFrame) -> AppResult<PathBuf> {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = snapshot_directory().join(format!("DEPTH_{}.png", timestamp));
    save_view_frame_to(frame, &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_reload_roundtrip() {
        let frame = ViewFrame {
            rgba: vec![10, 20, 30, 255, 40, 50, 60, 255],
            width: 2,
            height: 1,
        };
        let path = std::env::temp_dir()
            .join("depth_view_storage_test")
            .join("snap.png");

        save_view_frame_to(&frame, &path).unwrap();
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_mismatched_buffer_is_error() {
        let frame = ViewFrame {
            rgba: vec![0; 3],
            width: 2,
            height: 2,
        };
        let path = std::env::temp_dir().join("never_written.png");
        assert!(save_view_frame_to(&frame, &path).is_err());
    }
}

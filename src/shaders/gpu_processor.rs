// SPDX-License-Identifier: GPL-3.0-only

//! Shared GPU processor infrastructure
//!
//! Common plumbing for compute processors:
//! - Singleton management (OnceLock<Mutex<Option<T>>>)
//! - Dimension caching for texture/buffer reuse
//! - Row padding math for texture readback
//! - Async buffer readback

use crate::gpu::wgpu;

/// Cached resource dimensions - avoids reallocation when dimensions match
///
/// The processor keeps one of these per texture it owns; resources are
/// recreated only when the incoming dimensions differ.
#[derive(Default, Clone, Copy, PartialEq, Debug)]
pub struct CachedDimensions {
    pub width: u32,
    pub height: u32,
}

impl CachedDimensions {
    /// Check if dimensions have changed and need update
    pub fn needs_update(&self, width: u32, height: u32) -> bool {
        self.width != width || self.height != height
    }

    /// Update cached dimensions
    pub fn update(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Check if dimensions are initialized (non-zero)
    pub fn is_initialized(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Calculate compute shader dispatch size (workgroups needed)
#[inline]
pub fn compute_dispatch_size(dimension: u32, workgroup_size: u32) -> u32 {
    dimension.div_ceil(workgroup_size)
}

/// Row length in bytes, padded to wgpu's texture-to-buffer copy alignment.
///
/// `copy_texture_to_buffer` requires `bytes_per_row` to be a multiple of
/// COPY_BYTES_PER_ROW_ALIGNMENT (256); readback code must strip the
/// padding again row by row.
#[inline]
pub fn padded_bytes_per_row(unpadded_bytes_per_row: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded_bytes_per_row.div_ceil(align) * align
}

/// Helper for async buffer readback (map, poll, read, unmap)
///
/// # Arguments
/// * `device` - The wgpu device for polling
/// * `buffer` - The buffer to read from (must be MAP_READ)
///
/// # Returns
/// The buffer contents as a Vec<u8>
pub async fn read_buffer_async(
    device: &wgpu::Device,
    buffer: &wgpu::Buffer,
) -> Result<Vec<u8>, String> {
    let slice = buffer.slice(..);
    let (sender, receiver) = futures::channel::oneshot::channel();

    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = sender.send(result);
    });

    let _ = device.poll(wgpu::PollType::wait_indefinitely());

    receiver
        .await
        .map_err(|_| "Failed to receive buffer mapping".to_string())?
        .map_err(|e| format!("Failed to map buffer: {:?}", e))?;

    let data = slice.get_mapped_range().to_vec();
    buffer.unmap();

    Ok(data)
}

/// Macro for generating singleton accessor functions
///
/// Each processor needs a static OnceLock<Mutex<Option<Processor>>> and a
/// lazily-initializing accessor; this generates both.
///
/// # Example
/// ```ignore
/// gpu_processor_singleton!(DepthViewProcessor, GPU_DEPTH_VIEW, get_depth_view_processor);
/// ```
#[macro_export]
macro_rules! gpu_processor_singleton {
    ($processor:ty, $static_name:ident, $get_fn:ident) => {
        /// Cached GPU processor instance
        static $static_name: std::sync::OnceLock<tokio::sync::Mutex<Option<$processor>>> =
            std::sync::OnceLock::new();

        /// Get or create the shared GPU processor instance
        pub async fn $get_fn()
        -> Result<tokio::sync::MutexGuard<'static, Option<$processor>>, String> {
            let lock = $static_name.get_or_init(|| tokio::sync::Mutex::new(None));
            let mut guard = lock.lock().await;

            if guard.is_none() {
                match <$processor>::new().await {
                    Ok(processor) => {
                        *guard = Some(processor);
                    }
                    Err(e) => {
                        tracing::warn!(
                            concat!("Failed to initialize GPU ", stringify!($processor), ": {}"),
                            e
                        );
                        return Err(e);
                    }
                }
            }

            Ok(guard)
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_dimensions() {
        let mut dims = CachedDimensions::default();
        assert!(!dims.is_initialized());
        assert!(dims.needs_update(640, 480));

        dims.update(640, 480);
        assert!(dims.is_initialized());
        assert!(!dims.needs_update(640, 480));
        assert!(dims.needs_update(320, 240));
    }

    #[test]
    fn test_compute_dispatch_size() {
        assert_eq!(compute_dispatch_size(640, 16), 40);
        assert_eq!(compute_dispatch_size(641, 16), 41);
        assert_eq!(compute_dispatch_size(16, 16), 1);
        assert_eq!(compute_dispatch_size(1, 16), 1);
    }

    #[test]
    fn test_padded_bytes_per_row() {
        // Already aligned widths pass through
        assert_eq!(padded_bytes_per_row(640 * 4), 640 * 4);
        // Odd terminal widths round up to the alignment
        assert_eq!(padded_bytes_per_row(131 * 4), 768);
        assert_eq!(padded_bytes_per_row(1), 256);
    }
}

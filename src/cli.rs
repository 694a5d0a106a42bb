// SPDX-License-Identifier: GPL-3.0-only

//! CLI command implementations (snapshot, probe)

use depth_view::backends::depth::{DepthSource, SyntheticDepthSource, load_depth_frame};
use depth_view::errors::{AppError, RenderError};
use depth_view::shaders::depth_view::{
    ColorMode, DepthRange, ViewFrame, depth_to_rgba, render_depth_view,
};
use depth_view::storage::{save_view_frame, save_view_frame_to};
use std::path::PathBuf;
use tracing::info;

/// Report the GPU adapter this machine would run the pipeline on
pub fn probe() -> Result<(), Box<dyn std::error::Error>> {
    println!("depth-view {}", env!("GIT_VERSION"));

    let (_device, _queue, info) =
        pollster::block_on(depth_view::gpu::create_compute_device("depth_view_probe"))?;
    println!("Adapter: {} ({:?})", info.adapter_name, info.backend);
    Ok(())
}

/// Render one depth frame to a PNG file.
///
/// The frame comes from `input` (decoded depth image) or the synthetic
/// scene. `cpu` selects the reference CPU mapping instead of the GPU
/// pipeline; output pixels are identical either way.
pub fn snapshot(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    min_depth: f32,
    max_depth: f32,
    turbo: bool,
    cpu: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame = match &input {
        Some(path) => load_depth_frame(path)?,
        None => SyntheticDepthSource::new()
            .poll_frame()
            .ok_or("Synthetic source produced no frame")?,
    };

    info!(
        width = frame.width,
        height = frame.height,
        cpu,
        "Rendering snapshot"
    );

    let range = DepthRange::new(min_depth, max_depth);
    let mode = if turbo {
        ColorMode::Turbo
    } else {
        ColorMode::Grayscale
    };

    let view = if cpu {
        ViewFrame {
            rgba: depth_to_rgba(
                &frame.samples,
                frame.width,
                frame.height,
                frame.stride,
                range,
                mode,
                0.0,
            ),
            width: frame.width,
            height: frame.height,
        }
    } else {
        pollster::block_on(render_depth_view(
            Some(&frame),
            frame.width,
            frame.height,
            range,
            mode,
            0.0,
        ))
        .map_err(|e| AppError::Render(RenderError::FrameFailed(e)))?
        .ok_or("Renderer produced no frame")?
    };

    let path = match output {
        Some(path) => {
            save_view_frame_to(&view, &path)?;
            path
        }
        None => save_view_frame(&view)?,
    };
    println!("Snapshot written to {}", path.display());
    Ok(())
}

// SPDX-License-Identifier: GPL-3.0-only

//! GPU depth visualization processor
//!
//! Owns the two stages of the pipeline:
//! - upload: raw f32 depth samples (meters) into an R32Float texture,
//!   reused while frame dimensions hold, reallocated when they change
//! - render: one compute dispatch mapping the depth texture through the
//!   current range window into an Rgba8Unorm output, read back as bytes
//!
//! The uploaded texture outlives the frame that filled it, which is what
//! makes the last-good-frame policy work: ticks without new source data
//! re-render from the previous upload.

use crate::backends::depth::types::DepthFrame;
use crate::gpu::{self, wgpu};
use crate::gpu_processor_singleton;
use crate::shaders::{
    CachedDimensions, compute_dispatch_size, padded_bytes_per_row, read_buffer_async,
};
use std::sync::Arc;
use tracing::{debug, info};

use super::range::DepthRange;
use super::visualization::ColorMode;

/// Visualization parameters, mirrored by VizParams in visualize.wgsl
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct VizParams {
    input_width: u32,
    input_height: u32,
    output_width: u32,
    output_height: u32,
    min_depth_m: f32,
    max_depth_m: f32,
    color_mode: u32, // 0 = grayscale, 1 = turbo colormap
    bands: f32,      // 0.0 = no quantization
}

/// One colorized frame, ready for presentation
pub struct ViewFrame {
    /// RGBA pixel data (width * height * 4 bytes, tightly packed)
    pub rgba: Vec<u8>,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
}

/// GPU processor for depth range visualization
pub struct DepthViewProcessor {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    // Cached resources for current input/output dimensions
    input_dims: CachedDimensions,
    output_dims: CachedDimensions,
    depth_texture: Option<wgpu::Texture>,
    output_texture: Option<wgpu::Texture>,
    staging_buffer: Option<wgpu::Buffer>,
}

impl DepthViewProcessor {
    /// Create a new GPU depth visualization processor
    pub async fn new() -> Result<Self, String> {
        info!("Initializing GPU depth visualization processor");

        let (device, queue, gpu_info) = gpu::create_compute_device("depth_view_gpu").await?;

        info!(
            adapter_name = %gpu_info.adapter_name,
            adapter_backend = ?gpu_info.backend,
            "GPU device created for depth visualization"
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("depth_visualize_shader"),
            source: wgpu::ShaderSource::Wgsl(super::VISUALIZE_SHADER.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("depth_view_bind_group_layout"),
            entries: &[
                // Depth input texture (R32Float is not filterable without
                // extra features; the shader uses textureLoad)
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Output RGBA texture
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: wgpu::TextureFormat::Rgba8Unorm,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
                // Uniform parameters
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("depth_view_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("depth_visualize_pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("depth_view_uniform_buffer"),
            size: std::mem::size_of::<VizParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            device,
            queue,
            pipeline,
            bind_group_layout,
            uniform_buffer,
            input_dims: CachedDimensions::default(),
            output_dims: CachedDimensions::default(),
            depth_texture: None,
            output_texture: None,
            staging_buffer: None,
        })
    }

    /// Whether a depth frame has ever been uploaded (last-good available)
    pub fn has_frame(&self) -> bool {
        self.depth_texture.is_some()
    }

    /// Dimensions of the currently uploaded depth frame
    pub fn input_dimensions(&self) -> (u32, u32) {
        (self.input_dims.width, self.input_dims.height)
    }

    fn ensure_input_texture(&mut self, width: u32, height: u32) {
        if self.depth_texture.is_some() && !self.input_dims.needs_update(width, height) {
            return;
        }

        debug!(width, height, "Allocating depth input texture");

        self.depth_texture = Some(self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_input_texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R32Float,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        }));

        self.input_dims.update(width, height);
    }

    fn ensure_output_resources(&mut self, width: u32, height: u32) {
        if self.output_texture.is_some() && !self.output_dims.needs_update(width, height) {
            return;
        }

        debug!(width, height, "Allocating depth view output resources");

        self.output_texture = Some(self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_view_output_texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        }));

        // Staging rows are padded to the copy alignment and stripped on readback
        let padded_row = padded_bytes_per_row(width * 4) as u64;
        self.staging_buffer = Some(self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("depth_view_staging_buffer"),
            size: padded_row * height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        }));

        self.output_dims.update(width, height);
    }

    /// Upload a depth frame into the GPU texture.
    ///
    /// Texel (x, y) ends up holding the depth sample at (x, y) in meters,
    /// untouched - no scaling or channel reinterpretation. The frame's row
    /// stride is forwarded to the copy, so padded rows never reach the
    /// texture. Dimension changes against the previous upload reallocate
    /// the texture; matching dimensions reuse it.
    pub fn upload_frame(&mut self, frame: &DepthFrame) -> Result<(), String> {
        if frame.width == 0 || frame.height == 0 {
            return Err(format!(
                "depth frame has zero dimension: {}x{}",
                frame.width, frame.height
            ));
        }

        self.ensure_input_texture(frame.width, frame.height);
        let texture = self
            .depth_texture
            .as_ref()
            .ok_or("Depth texture not allocated")?;

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(&frame.samples),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(frame.stride * 4),
                rows_per_image: Some(frame.height),
            },
            wgpu::Extent3d {
                width: frame.width,
                height: frame.height,
                depth_or_array_layers: 1,
            },
        );

        Ok(())
    }

    /// Colorize the uploaded depth frame at the requested output size.
    ///
    /// Requires a prior [`upload_frame`](Self::upload_frame); render loops
    /// call this on every tick regardless of whether new source data
    /// arrived, which is what keeps range changes live while the sensor
    /// stalls.
    pub async fn render(
        &mut self,
        output_width: u32,
        output_height: u32,
        range: DepthRange,
        mode: ColorMode,
        bands: f32,
    ) -> Result<ViewFrame, String> {
        if !self.has_frame() {
            return Err("No depth frame uploaded".to_string());
        }
        if output_width == 0 || output_height == 0 {
            return Err(format!(
                "output has zero dimension: {}x{}",
                output_width, output_height
            ));
        }

        self.ensure_output_resources(output_width, output_height);

        let depth_texture = self
            .depth_texture
            .as_ref()
            .ok_or("Depth texture not allocated")?;
        let output_texture = self
            .output_texture
            .as_ref()
            .ok_or("Output texture not allocated")?;
        let staging_buffer = self
            .staging_buffer
            .as_ref()
            .ok_or("Staging buffer not allocated")?;

        let params = VizParams {
            input_width: self.input_dims.width,
            input_height: self.input_dims.height,
            output_width,
            output_height,
            min_depth_m: range.min_m,
            max_depth_m: range.max_m,
            color_mode: mode.shader_flag(),
            bands,
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&params));

        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let output_view = output_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("depth_view_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&depth_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&output_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
            ],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("depth_view_encoder"),
            });

        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("depth_view_compute_pass"),
                timestamp_writes: None,
            });

            compute_pass.set_pipeline(&self.pipeline);
            compute_pass.set_bind_group(0, Some(&bind_group), &[]);

            // One thread per output pixel, 16x16 per workgroup
            let workgroups_x = compute_dispatch_size(output_width, 16);
            let workgroups_y = compute_dispatch_size(output_height, 16);
            compute_pass.dispatch_workgroups(workgroups_x, workgroups_y, 1);
        }

        let padded_row = padded_bytes_per_row(output_width * 4);
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: output_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: staging_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(output_height),
                },
            },
            wgpu::Extent3d {
                width: output_width,
                height: output_height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        // Read back and strip the row padding
        let data = read_buffer_async(&self.device, staging_buffer).await?;
        let row_bytes = (output_width * 4) as usize;
        let mut rgba = Vec::with_capacity(row_bytes * output_height as usize);
        for row in 0..output_height as usize {
            let start = row * padded_row as usize;
            rgba.extend_from_slice(&data[start..start + row_bytes]);
        }

        Ok(ViewFrame {
            rgba,
            width: output_width,
            height: output_height,
        })
    }
}

// Use the shared singleton macro for GPU processor management
gpu_processor_singleton!(DepthViewProcessor, GPU_DEPTH_VIEW, get_depth_view_processor);

/// Run one visualization tick against the shared GPU processor.
///
/// This is the per-frame entry point for render loops:
/// - `Some(frame)` uploads the new depth data first (reallocating GPU
///   resources if the dimensions changed mid-stream)
/// - `None` reuses the last uploaded frame
/// - `Ok(None)` means there is nothing to present yet (no frame has ever
///   arrived); the caller skips this tick entirely
pub async fn render_depth_view(
    frame: Option<&DepthFrame>,
    output_width: u32,
    output_height: u32,
    range: DepthRange,
    mode: ColorMode,
    bands: f32,
) -> Result<Option<ViewFrame>, String> {
    let mut guard = get_depth_view_processor().await?;
    let processor = guard
        .as_mut()
        .ok_or("GPU depth view processor not initialized")?;

    if let Some(frame) = frame {
        processor.upload_frame(frame)?;
    }

    if !processor.has_frame() {
        debug!("No depth frame available yet, skipping tick");
        return Ok(None);
    }

    processor
        .render(output_width, output_height, range, mode, bands)
        .await
        .map(Some)
}

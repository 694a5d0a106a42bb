// SPDX-License-Identifier: GPL-3.0-only
//! GPU pipeline modules
//!
//! `depth_view` holds the visualization pipeline itself; `gpu_processor`
//! is the shared infrastructure (dimension caching, readback, singleton
//! management) it is built on.

pub mod depth_view;
mod gpu_processor;

pub use gpu_processor::{
    CachedDimensions, compute_dispatch_size, padded_bytes_per_row, read_buffer_async,
};

pub use depth_view::{
    ColorMode, DepthRange, DepthRangeChannel, DepthViewProcessor, ViewFrame, render_depth_view,
};

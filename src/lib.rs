// SPDX-License-Identifier: GPL-3.0-only

//! depth-view - real-time false-color depth map visualization
//!
//! Converts single-channel f32 depth frames (meters) into colorized RGBA
//! frames at interactive rates, with a user-adjustable [min, max] depth
//! window controlling the mapping.
//!
//! # Architecture
//!
//! - [`backends`]: depth source adapters (synthetic scene, file decode)
//! - [`shaders`]: the GPU visualization pipeline and its CPU reference
//! - [`gpu`]: compute device creation
//! - [`terminal`]: the interactive half-block viewer
//! - [`config`]: user configuration handling
//! - [`storage`]: snapshot files

pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod gpu;
pub mod shaders;
pub mod storage;
pub mod terminal;

// Re-export commonly used types
pub use backends::depth::{DepthFrame, DepthSource, SyntheticDepthSource};
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use shaders::depth_view::{ColorMode, DepthRange, ViewFrame, render_depth_view};

// SPDX-License-Identifier: GPL-3.0-only

//! Depth source adapters
//!
//! The pipeline consumes frames through the [`DepthSource`] trait; real
//! sensor capture is owned by an external collaborator. The adapters
//! here make the pipeline drivable without hardware: a synthetic scene
//! and a file decoder.

pub mod file_source;
pub mod synthetic;
pub mod types;

pub use file_source::load_depth_frame;
pub use synthetic::SyntheticDepthSource;
pub use types::{DepthFrame, DepthSource, SourceError, SourceResult};

// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the depth viewer

use crate::backends::depth::types::SourceError;
use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Depth source errors
    Source(SourceError),
    /// Rendering errors
    Render(RenderError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Rendering-specific errors
#[derive(Debug, Clone)]
pub enum RenderError {
    /// No compute device available or device request failed.
    /// Fatal at startup: the pipeline cannot run without a device.
    DeviceUnavailable(String),
    /// Per-frame GPU operation failed (upload, dispatch, readback)
    FrameFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Source(e) => write!(f, "Depth source error: {}", e),
            AppError::Render(e) => write!(f, "Render error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::DeviceUnavailable(msg) => write!(f, "No GPU device: {}", msg),
            RenderError::FrameFailed(msg) => write!(f, "Frame rendering failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for RenderError {}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::Source(err)
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Render(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

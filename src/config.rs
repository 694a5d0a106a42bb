// SPDX-License-Identifier: GPL-3.0-only

//! User configuration handling
//!
//! The viewer persists its visualization settings as JSON under the user
//! config directory. Loading never fails the app: unreadable or invalid
//! config falls back to defaults with a warning.

use crate::constants::{DEFAULT_MAX_DEPTH_M, DEFAULT_MIN_DEPTH_M};
use crate::errors::{AppError, AppResult};
use crate::shaders::depth_view::{ColorMode, DepthRange};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Near bound of the visualized window (meters)
    pub min_depth_m: f32,
    /// Far bound of the visualized window (meters)
    pub max_depth_m: f32,
    /// Grayscale or turbo colormap
    pub color_mode: ColorMode,
    /// Quantize intensities into discrete bands
    pub quantize: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_depth_m: DEFAULT_MIN_DEPTH_M,
            max_depth_m: DEFAULT_MAX_DEPTH_M,
            color_mode: ColorMode::default(),
            quantize: false,
        }
    }
}

impl Config {
    /// The configured window with the range invariant enforced. Values
    /// edited by hand in the JSON file may be out of order; this is the
    /// only way the rest of the app reads them.
    pub fn depth_range(&self) -> DepthRange {
        DepthRange::new(self.min_depth_m, self.max_depth_m)
    }

    /// Load the config file, falling back to defaults on any problem
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            warn!("No config directory available, using default config");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Config>(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "No config file, using defaults");
                Self::default()
            }
        }
    }

    /// Persist the config as pretty-printed JSON
    pub fn save(&self) -> AppResult<()> {
        let path = Self::config_path()
            .ok_or_else(|| AppError::Config("No config directory available".to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Serialization failed: {}", e)))?;
        std::fs::write(&path, contents)?;

        debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("depth-view").join("config.json"))
    }
}

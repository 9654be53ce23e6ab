// SPDX-License-Identifier: GPL-3.0-only

//! Runtime configuration
//!
//! Configuration is a JSON document. Every field has a default, so an empty
//! object (or a missing file, via [`Config::load_or_default`]) yields a
//! working setup with every built-in backend enabled.

use crate::constants::{self, DeintRate};
use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// VA-API backend settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaapiConfig {
    /// Register the VA-API backend
    pub enabled: bool,
    /// DRM render node to open
    pub device: PathBuf,
    /// Deinterlacer output rate
    pub deint_rate: DeintRate,
    /// Only deinterlace frames flagged as interlaced
    pub deint_auto: bool,
}

impl Default for VaapiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            device: PathBuf::from(constants::vaapi::DEFAULT_DEVICE),
            deint_rate: DeintRate::default(),
            deint_auto: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Master switch; when false no backend is registered
    pub enabled: bool,
    /// Longest filter description returned to the pipeline
    pub filter_max_len: usize,
    /// VA-API backend settings
    pub vaapi: VaapiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            filter_max_len: constants::filters::DEFAULT_MAX_LEN,
            vaapi: VaapiConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&contents)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Default configuration file location (`<config dir>/hwaccel/config.json`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(constants::config::APP_DIR)
                .join(constants::config::FILE_NAME)
        })
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

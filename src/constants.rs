// SPDX-License-Identifier: GPL-3.0-only

//! Crate-wide constants

use serde::{Deserialize, Serialize};

/// Output rate of a hardware deinterlacer
///
/// `Frame` emits one frame per input frame, `Field` one per field (double
/// rate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeintRate {
    /// One output frame per input frame (default)
    #[default]
    Frame,
    /// One output frame per field
    Field,
}

impl DeintRate {
    /// Get all variants for iteration
    pub const ALL: [DeintRate; 2] = [DeintRate::Frame, DeintRate::Field];

    /// Value used in filter option strings
    pub fn option_value(&self) -> &'static str {
        match self {
            DeintRate::Frame => "frame",
            DeintRate::Field => "field",
        }
    }
}

/// VA-API defaults
pub mod vaapi {
    /// Render node opened when no device is configured
    pub const DEFAULT_DEVICE: &str = "/dev/dri/renderD128";

    /// Scale filter name
    pub const SCALE_FILTER: &str = "scale_vaapi";

    /// Deinterlace filter name
    pub const DEINT_FILTER: &str = "deinterlace_vaapi";
}

/// Filter description limits
pub mod filters {
    /// Longest filter fragment handed to the pipeline by default
    pub const DEFAULT_MAX_LEN: usize = 512;
}

/// Configuration file location
pub mod config {
    /// Directory under the user's config dir
    pub const APP_DIR: &str = "hwaccel";

    /// Configuration file name
    pub const FILE_NAME: &str = "config.json";
}

/// Build information utilities
pub mod app_info {
    /// Get the version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deint_rate_values() {
        assert_eq!(DeintRate::default(), DeintRate::Frame);
        assert_eq!(DeintRate::Frame.option_value(), "frame");
        assert_eq!(DeintRate::Field.option_value(), "field");
    }
}

// SPDX-License-Identifier: MPL-2.0

//! Error types for hardware acceleration negotiation and lifecycle

use crate::backends::BackendError;
use crate::backends::registry::RegistryError;
use crate::media::formats::PixelFormat;
use std::fmt;

/// Result type alias using HwAccelError
pub type HwAccelResult<T> = Result<T, HwAccelError>;

/// Result type alias using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors reported by negotiation, context lifecycle and filter selection
///
/// None of these is fatal: negotiation turns them into "try the next
/// candidate", and the pipeline falls back to software on the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HwAccelError {
    /// The decoder has no native hardware configuration for this format
    FormatNotSupported(PixelFormat),
    /// No backend is registered for this format (or it cannot set up)
    NoBackend(PixelFormat),
    /// The record already has a hardware context attached
    ContextAttached,
    /// The record has no hardware context attached
    NoContext,
    /// The active backend cannot produce the requested filter
    FilterUnsupported(PixelFormat),
    /// The filter description exceeds the allowed length
    FilterTooLong { len: usize, max: usize },
    /// The backend failed internally
    Backend {
        format: PixelFormat,
        source: BackendError,
    },
    /// The process-wide instance was already initialized
    AlreadyInitialized,
    /// The backend table could not be assembled
    Registry(RegistryError),
}

/// Configuration loading errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// File could not be read
    Io(String),
    /// File contents are not valid configuration
    Parse(String),
}

impl fmt::Display for HwAccelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HwAccelError::FormatNotSupported(format) => {
                write!(f, "No HWAccel for the pixel format '{}'", format.name())
            }
            HwAccelError::NoBackend(format) => {
                write!(f, "No backend registered for '{}'", format.name())
            }
            HwAccelError::ContextAttached => write!(f, "Hardware context already attached"),
            HwAccelError::NoContext => write!(f, "No hardware context attached"),
            HwAccelError::FilterUnsupported(format) => {
                write!(f, "Filter not supported for '{}'", format.name())
            }
            HwAccelError::FilterTooLong { len, max } => {
                write!(f, "Filter description too long ({} > {} bytes)", len, max)
            }
            HwAccelError::Backend { format, source } => {
                write!(f, "Backend '{}' failed: {}", format.name(), source)
            }
            HwAccelError::AlreadyInitialized => write!(f, "Module already initialized"),
            HwAccelError::Registry(e) => write!(f, "Registry error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Configuration I/O error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Configuration parse error: {}", msg),
        }
    }
}

impl std::error::Error for HwAccelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HwAccelError::Backend { source, .. } => Some(source),
            HwAccelError::Registry(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<RegistryError> for HwAccelError {
    fn from(err: RegistryError) -> Self {
        HwAccelError::Registry(err)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_unknown_format_message() {
        let err = HwAccelError::FormatNotSupported(PixelFormat::Unknown(77));
        assert_eq!(err.to_string(), "No HWAccel for the pixel format '<unk>'");
    }

    #[test]
    fn test_backend_error_source() {
        let err = HwAccelError::Backend {
            format: PixelFormat::Vaapi,
            source: BackendError::DeviceUnavailable("gone".to_string()),
        };
        assert!(err.source().is_some());
        assert!(HwAccelError::NoContext.source().is_none());
    }
}

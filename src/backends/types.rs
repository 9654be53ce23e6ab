// SPDX-License-Identifier: MPL-2.0

//! Shared types for hardware acceleration backends

use std::any::Any;
use std::fmt;

/// Backend-private state behind an attached hardware context
///
/// Created by a backend's setup operation and handed back to the same backend
/// on close. The core never inspects it.
pub type ContextState = Box<dyn Any + Send>;

/// Operations a backend may implement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create a decode context
    SetupDecode,
    /// Destroy a decode context
    CloseDecode,
    /// Create an encode context
    SetupEncode,
    /// Destroy an encode context
    CloseEncode,
    /// Produce a scale filter description
    ScaleFilter,
    /// Produce a deinterlace filter description
    DeintFilter,
    /// Release process-wide resources at module shutdown
    Shutdown,
}

impl Capability {
    /// Get all capabilities for iteration
    pub const ALL: [Capability; 7] = [
        Capability::SetupDecode,
        Capability::CloseDecode,
        Capability::SetupEncode,
        Capability::CloseEncode,
        Capability::ScaleFilter,
        Capability::DeintFilter,
        Capability::Shutdown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Capability::SetupDecode => "setup-decode",
            Capability::CloseDecode => "close-decode",
            Capability::SetupEncode => "setup-encode",
            Capability::CloseEncode => "close-encode",
            Capability::ScaleFilter => "scale-filter",
            Capability::DeintFilter => "deint-filter",
            Capability::Shutdown => "shutdown",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend does not implement this operation
    Unsupported(Capability),
    /// The hardware device could not be opened or is gone
    DeviceUnavailable(String),
    /// Codec parameters are unusable for this backend
    InvalidParameters(String),
    /// Context state handed back does not belong to this backend
    InvalidContext,
    /// Other errors
    Other(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Unsupported(cap) => write!(f, "Operation not supported: {}", cap),
            BackendError::DeviceUnavailable(msg) => write!(f, "Device unavailable: {}", msg),
            BackendError::InvalidParameters(msg) => write!(f, "Invalid parameters: {}", msg),
            BackendError::InvalidContext => write!(f, "Context does not belong to this backend"),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::DeviceUnavailable(err.to_string())
    }
}

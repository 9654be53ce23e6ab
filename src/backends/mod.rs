// SPDX-License-Identifier: MPL-2.0

//! Hardware acceleration backend abstraction
//!
//! Every hardware path (VA-API, CUDA, ...) is one [`HwAccelBackend`]
//! instance registered in a [`BackendRegistry`] under the pixel format it
//! claims.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  Negotiator/Filters │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │   BackendRegistry   │  ← pixel format → backend, frozen after init
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ HwAccelBackend Trait│  ← capability interface
//! └──────────┬──────────┘
//!            │
//!            ▼
//!        ┌───────┐
//!        │ VAAPI │  ← concrete implementation
//!        └───────┘
//! ```

pub mod registry;
pub mod types;
pub mod vaapi;

pub use registry::{BackendRegistry, BackendRegistryBuilder};
pub use types::*;

use crate::config::Config;
use crate::media::formats::PixelFormat;
use crate::media::params::CodecParams;
use std::sync::Arc;
use tracing::debug;

/// Capability interface implemented by every hardware backend
///
/// Only `name`, `pixel_format` and `capabilities` are mandatory. Each
/// operation has a default body returning [`BackendError::Unsupported`]; a
/// backend overrides the ones it lists in `capabilities`. Callers check
/// [`HwAccelBackend::supports`] before dispatching, so a missing capability is
/// an ordinary state rather than a failure.
pub trait HwAccelBackend: Send + Sync {
    // ===== Metadata =====

    /// Short identifier used in logs (e.g. "vaapi")
    fn name(&self) -> &'static str;

    /// The hardware pixel format this backend handles
    fn pixel_format(&self) -> PixelFormat;

    /// Operations this backend implements
    fn capabilities(&self) -> &'static [Capability];

    /// Check whether a capability is implemented
    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    // ===== Decode =====

    /// Allocate a native decode context for the given codec parameters
    ///
    /// # Returns
    /// * `Ok(ContextState)` - State to attach to the codec parameter record
    /// * `Err(BackendError)` - Driver or resource failure
    fn setup_decode(&self, _params: &CodecParams) -> BackendResult<ContextState> {
        Err(BackendError::Unsupported(Capability::SetupDecode))
    }

    /// Release a decode context previously returned by `setup_decode`
    fn close_decode(&self, _state: ContextState) -> BackendResult<()> {
        Err(BackendError::Unsupported(Capability::CloseDecode))
    }

    // ===== Encode =====

    /// Allocate a native encode context for the given codec parameters
    fn setup_encode(&self, _params: &CodecParams) -> BackendResult<ContextState> {
        Err(BackendError::Unsupported(Capability::SetupEncode))
    }

    /// Release an encode context previously returned by `setup_encode`
    fn close_encode(&self, _state: ContextState) -> BackendResult<()> {
        Err(BackendError::Unsupported(Capability::CloseEncode))
    }

    // ===== Filters =====

    /// Describe a scale filter converting hardware frames of `input` into
    /// the geometry of `output`
    fn scale_filter(
        &self,
        _state: &ContextState,
        _input: &CodecParams,
        _output: &CodecParams,
    ) -> BackendResult<String> {
        Err(BackendError::Unsupported(Capability::ScaleFilter))
    }

    /// Describe a deinterlace filter for hardware frames of `params`
    fn deint_filter(&self, _state: &ContextState, _params: &CodecParams) -> BackendResult<String> {
        Err(BackendError::Unsupported(Capability::DeintFilter))
    }

    // ===== Module =====

    /// Release process-wide (driver level) resources
    fn shutdown(&self) -> BackendResult<()> {
        Err(BackendError::Unsupported(Capability::Shutdown))
    }
}

/// Instantiate the built-in backends enabled by the configuration
///
/// Returns an empty list when hardware acceleration is disabled globally.
pub fn builtin_backends(config: &Config) -> Vec<Arc<dyn HwAccelBackend>> {
    let mut backends: Vec<Arc<dyn HwAccelBackend>> = Vec::new();

    if !config.enabled {
        debug!("Hardware acceleration disabled by configuration");
        return backends;
    }

    if config.vaapi.enabled {
        backends.push(Arc::new(vaapi::VaapiBackend::new(config.vaapi.clone())));
    } else {
        debug!("VA-API backend disabled by configuration");
    }

    backends
}

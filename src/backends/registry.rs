// SPDX-License-Identifier: GPL-3.0-only

//! Backend capability table
//!
//! The registry maps a hardware pixel format to the single backend that
//! handles it. It is assembled once through [`BackendRegistryBuilder`] and is
//! immutable afterwards, so it can be shared across session threads without
//! locking.

use super::HwAccelBackend;
use super::types::Capability;
use crate::media::formats::PixelFormat;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Errors raised while assembling a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Another backend already claims this pixel format
    DuplicateBackend(PixelFormat),
    /// The claimed pixel format is not hardware-accelerated
    NotHardwareFormat(PixelFormat),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateBackend(format) => {
                write!(f, "A backend is already registered for '{}'", format)
            }
            RegistryError::NotHardwareFormat(format) => {
                write!(f, "Pixel format '{}' is not hardware-accelerated", format)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Immutable pixel format → backend table
#[derive(Clone, Default)]
pub struct BackendRegistry {
    /// Backends in registration order
    backends: Vec<Arc<dyn HwAccelBackend>>,
    /// Index into `backends` by claimed pixel format
    by_format: HashMap<PixelFormat, usize>,
}

impl BackendRegistry {
    /// Start assembling a registry
    pub fn builder() -> BackendRegistryBuilder {
        BackendRegistryBuilder::default()
    }

    /// A registry with no backends (software-only operation)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Find the backend registered for a pixel format
    ///
    /// Unknown or unregistered formats yield `None`.
    pub fn get(&self, format: PixelFormat) -> Option<&Arc<dyn HwAccelBackend>> {
        self.by_format.get(&format).map(|&i| &self.backends[i])
    }

    /// Find the backend for a format only if it implements `capability`
    pub fn get_with(
        &self,
        format: PixelFormat,
        capability: Capability,
    ) -> Option<&Arc<dyn HwAccelBackend>> {
        self.get(format).filter(|b| b.supports(capability))
    }

    /// Iterate over backends in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn HwAccelBackend>> {
        self.backends.iter()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.backends
                    .iter()
                    .map(|b| (b.name(), b.pixel_format().name())),
            )
            .finish()
    }
}

/// Builder for [`BackendRegistry`]
#[derive(Default)]
pub struct BackendRegistryBuilder {
    registry: BackendRegistry,
}

impl BackendRegistryBuilder {
    /// Register a backend under the pixel format it claims
    pub fn register(mut self, backend: Arc<dyn HwAccelBackend>) -> Result<Self, RegistryError> {
        let format = backend.pixel_format();

        if !format.is_hwaccel() {
            warn!(backend = backend.name(), format = %format, "Refusing non-hardware backend");
            return Err(RegistryError::NotHardwareFormat(format));
        }
        if self.registry.by_format.contains_key(&format) {
            warn!(backend = backend.name(), format = %format, "Duplicate backend registration");
            return Err(RegistryError::DuplicateBackend(format));
        }

        info!(
            backend = backend.name(),
            format = %format,
            capabilities = backend.capabilities().len(),
            "Registered hardware backend"
        );
        let index = self.registry.backends.len();
        self.registry.backends.push(backend);
        self.registry.by_format.insert(format, index);
        Ok(self)
    }

    /// Register several backends, stopping at the first rejected one
    pub fn register_all(
        self,
        backends: impl IntoIterator<Item = Arc<dyn HwAccelBackend>>,
    ) -> Result<Self, RegistryError> {
        backends.into_iter().try_fold(self, |b, backend| b.register(backend))
    }

    /// Freeze the table
    pub fn build(self) -> BackendRegistry {
        self.registry
    }
}

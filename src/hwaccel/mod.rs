// SPDX-License-Identifier: MPL-2.0

//! Hardware acceleration negotiation and context lifecycle
//!
//! [`HwAccels`] ties a frozen [`BackendRegistry`] to the configuration and
//! exposes the per-session operations:
//!
//! 1. [`HwAccels::select_decode_format`] picks a hardware format from the
//!    decoder's candidates and attaches a decode context
//! 2. [`HwAccels::get_scale_filter`] / [`HwAccels::get_deint_filter`] describe
//!    hardware filters while the context is attached
//! 3. [`HwAccels::close_decode_context`] releases it
//!
//! The encode side is [`HwAccels::setup_encode_context`] /
//! [`HwAccels::close_encode_context`]. All calls are synchronous and run on
//! the session's own thread; one `HwAccels` is shared by every session.

mod context;
mod filters;
pub mod global;
mod negotiator;

pub use filters::copy_filter_description;

use crate::backends::{BackendError, BackendRegistry, Capability, builtin_backends};
use crate::config::Config;
use crate::errors::HwAccelResult;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};

/// Outcome of encode context setup
///
/// Both variants mean "proceed"; they differ in whether frames must be
/// uploaded to a hardware context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeSetup {
    /// A hardware encode context is attached to the record
    Hardware,
    /// No hardware backend applies; encode in software
    Software,
}

impl EncodeSetup {
    /// Legacy status code: 0 for both outcomes
    pub fn status(&self) -> i32 {
        0
    }

    pub fn is_hardware(&self) -> bool {
        matches!(self, EncodeSetup::Hardware)
    }
}

/// Result of module shutdown
#[derive(Debug, Default)]
pub struct ShutdownReport {
    /// Backends whose shutdown completed
    pub completed: Vec<&'static str>,
    /// Backends whose shutdown failed, with the reason
    pub failed: Vec<(&'static str, BackendError)>,
}

impl ShutdownReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Registry plus settings shared by all sessions
#[derive(Debug)]
pub struct HwAccels {
    registry: BackendRegistry,
    filter_max_len: usize,
    shut_down: AtomicBool,
}

impl HwAccels {
    /// Module initialization: register the built-in backends the
    /// configuration enables
    ///
    /// No backend needs eager global setup; devices are opened per session.
    pub fn init(config: &Config) -> HwAccelResult<Self> {
        let registry = BackendRegistry::builder()
            .register_all(builtin_backends(config))?
            .build();
        info!(backends = registry.len(), "Hardware acceleration initialized");
        Ok(Self::with_registry(config, registry))
    }

    /// Build around an explicit registry
    pub fn with_registry(config: &Config, registry: BackendRegistry) -> Self {
        Self {
            registry,
            filter_max_len: config.filter_max_len,
            shut_down: AtomicBool::new(false),
        }
    }

    /// An instance with no backends; every session falls back to software
    pub fn software_only() -> Self {
        Self::with_registry(&Config::default(), BackendRegistry::empty())
    }

    /// The backend capability table
    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Module shutdown: let every backend release global resources
    ///
    /// Each backend is shut down independently; a failure is logged and
    /// recorded without stopping the rest. Only the first call does work.
    pub fn done(&self) -> ShutdownReport {
        let mut report = ShutdownReport::default();

        if self.shut_down.swap(true, Ordering::AcqRel) {
            debug!("Hardware acceleration already shut down");
            return report;
        }

        for backend in self
            .registry
            .iter()
            .filter(|b| b.supports(Capability::Shutdown))
        {
            match backend.shutdown() {
                Ok(()) => report.completed.push(backend.name()),
                Err(e) => {
                    error!(backend = backend.name(), error = %e, "Backend shutdown failed");
                    report.failed.push((backend.name(), e));
                }
            }
        }

        info!(
            completed = report.completed.len(),
            failed = report.failed.len(),
            "Hardware acceleration shut down"
        );
        report
    }

    /// Whether [`HwAccels::done`] has run
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }
}

// SPDX-License-Identifier: MPL-2.0

//! Process-wide instance
//!
//! Pipelines that do not thread an [`HwAccels`] through their sessions can
//! call [`module_init`] once at start-up, use the free functions here, and
//! call [`module_done`] at exit. Until `module_init` runs, every call behaves
//! as if no backend were registered.

use super::{EncodeSetup, HwAccels, ShutdownReport};
use crate::config::Config;
use crate::errors::{HwAccelError, HwAccelResult};
use crate::media::formats::PixelFormat;
use crate::media::params::CodecParams;
use std::sync::{LazyLock, OnceLock};
use tracing::debug;

static INSTANCE: OnceLock<HwAccels> = OnceLock::new();
static SOFTWARE_ONLY: LazyLock<HwAccels> = LazyLock::new(HwAccels::software_only);

fn current() -> &'static HwAccels {
    INSTANCE.get().unwrap_or_else(|| &*SOFTWARE_ONLY)
}

/// Initialize the process-wide instance
///
/// Must run before any session starts. A second call fails with
/// [`HwAccelError::AlreadyInitialized`].
pub fn module_init(config: &Config) -> HwAccelResult<&'static HwAccels> {
    if INSTANCE.get().is_some() {
        return Err(HwAccelError::AlreadyInitialized);
    }
    let hw = HwAccels::init(config)?;
    let mut fresh = false;
    let instance = INSTANCE.get_or_init(|| {
        fresh = true;
        hw
    });
    if fresh {
        Ok(instance)
    } else {
        Err(HwAccelError::AlreadyInitialized)
    }
}

/// Shut down every backend of the process-wide instance
pub fn module_done() -> ShutdownReport {
    match INSTANCE.get() {
        Some(hw) => hw.done(),
        None => {
            debug!("module_done called before module_init");
            ShutdownReport::default()
        }
    }
}

/// The process-wide instance, if initialized
pub fn instance() -> Option<&'static HwAccels> {
    INSTANCE.get()
}

/// See [`HwAccels::select_decode_format`]
pub fn select_decode_format(params: &mut CodecParams, candidates: &[PixelFormat]) -> PixelFormat {
    current().select_decode_format(params, candidates)
}

/// See [`HwAccels::close_decode_context`]
pub fn close_decode_context(params: &mut CodecParams) {
    current().close_decode_context(params)
}

/// See [`HwAccels::setup_encode_context`]
pub fn setup_encode_context(params: &mut CodecParams) -> HwAccelResult<EncodeSetup> {
    current().setup_encode_context(params)
}

/// See [`HwAccels::close_encode_context`]
pub fn close_encode_context(params: &mut CodecParams) {
    current().close_encode_context(params)
}

/// See [`HwAccels::get_scale_filter`]
pub fn get_scale_filter(input: &CodecParams, output: &CodecParams) -> HwAccelResult<String> {
    current().get_scale_filter(input, output)
}

/// See [`HwAccels::get_deint_filter`]
pub fn get_deint_filter(params: &CodecParams) -> HwAccelResult<String> {
    current().get_deint_filter(params)
}

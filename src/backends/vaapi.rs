// SPDX-License-Identifier: GPL-3.0-only

//! VA-API backend
//!
//! Contexts hold an open handle on the configured DRM render node for the
//! lifetime of a session. Filter descriptions target the `scale_vaapi` and
//! `deinterlace_vaapi` filters.

use super::types::{BackendError, BackendResult, Capability, ContextState};
use super::HwAccelBackend;
use crate::config::VaapiConfig;
use crate::constants;
use crate::media::formats::PixelFormat;
use crate::media::params::{CodecParams, ContextKind};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CAPABILITIES: &[Capability] = &Capability::ALL;

/// Per-session VA-API state
#[derive(Debug)]
struct VaapiContext {
    /// Open render node; closed when the context is dropped
    _device: File,
    device_path: PathBuf,
    kind: ContextKind,
    width: u32,
    height: u32,
}

/// VA-API hardware backend
#[derive(Debug, Clone)]
pub struct VaapiBackend {
    config: VaapiConfig,
}

impl VaapiBackend {
    pub fn new(config: VaapiConfig) -> Self {
        Self { config }
    }

    /// Render node this backend opens
    pub fn device(&self) -> &Path {
        &self.config.device
    }

    fn open_device(&self, params: &CodecParams, kind: ContextKind) -> BackendResult<VaapiContext> {
        let path = &self.config.device;
        let device = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| BackendError::DeviceUnavailable(format!("{}: {}", path.display(), e)))?;

        info!(
            device = %path.display(),
            codec = %params.codec_name,
            kind = %kind,
            "Opened VA-API device"
        );

        Ok(VaapiContext {
            _device: device,
            device_path: path.clone(),
            kind,
            width: params.width,
            height: params.height,
        })
    }

    fn release(&self, state: ContextState, expected: ContextKind) -> BackendResult<()> {
        let context = state
            .downcast::<VaapiContext>()
            .map_err(|_| BackendError::InvalidContext)?;
        if context.kind != expected {
            return Err(BackendError::InvalidContext);
        }
        debug!(
            device = %context.device_path.display(),
            kind = %context.kind,
            width = context.width,
            height = context.height,
            "Closing VA-API context"
        );
        Ok(())
    }
}

fn context_of(state: &ContextState) -> BackendResult<&VaapiContext> {
    state
        .downcast_ref::<VaapiContext>()
        .ok_or(BackendError::InvalidContext)
}

impl HwAccelBackend for VaapiBackend {
    fn name(&self) -> &'static str {
        "vaapi"
    }

    fn pixel_format(&self) -> PixelFormat {
        PixelFormat::Vaapi
    }

    fn capabilities(&self) -> &'static [Capability] {
        CAPABILITIES
    }

    fn setup_decode(&self, params: &CodecParams) -> BackendResult<ContextState> {
        let context = self.open_device(params, ContextKind::Decode)?;
        Ok(Box::new(context))
    }

    fn close_decode(&self, state: ContextState) -> BackendResult<()> {
        self.release(state, ContextKind::Decode)
    }

    fn setup_encode(&self, params: &CodecParams) -> BackendResult<ContextState> {
        // Encoder surfaces are allocated up front, so the geometry must be known
        if params.width == 0 || params.height == 0 {
            return Err(BackendError::InvalidParameters(format!(
                "encoder size {}x{}",
                params.width, params.height
            )));
        }
        let context = self.open_device(params, ContextKind::Encode)?;
        Ok(Box::new(context))
    }

    fn close_encode(&self, state: ContextState) -> BackendResult<()> {
        self.release(state, ContextKind::Encode)
    }

    fn scale_filter(
        &self,
        state: &ContextState,
        _input: &CodecParams,
        output: &CodecParams,
    ) -> BackendResult<String> {
        context_of(state)?;
        if output.width == 0 || output.height == 0 {
            return Err(BackendError::InvalidParameters(format!(
                "output size {}x{}",
                output.width, output.height
            )));
        }
        Ok(format!(
            "{}=w={}:h={}",
            constants::vaapi::SCALE_FILTER,
            output.width,
            output.height
        ))
    }

    fn deint_filter(&self, state: &ContextState, _params: &CodecParams) -> BackendResult<String> {
        context_of(state)?;
        Ok(format!(
            "{}=rate={}:auto={}",
            constants::vaapi::DEINT_FILTER,
            self.config.deint_rate.option_value(),
            u8::from(self.config.deint_auto)
        ))
    }

    fn shutdown(&self) -> BackendResult<()> {
        // Devices are per-session; nothing global is cached
        info!(device = %self.config.device.display(), "VA-API backend shut down");
        Ok(())
    }
}

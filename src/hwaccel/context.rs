// SPDX-License-Identifier: MPL-2.0

//! Decode and encode context lifecycle

use super::{EncodeSetup, HwAccels};
use crate::backends::Capability;
use crate::errors::{HwAccelError, HwAccelResult};
use crate::media::formats::PixelFormat;
use crate::media::params::{CodecParams, ContextKind, HwContext};
use tracing::{debug, error, info, warn};

impl HwAccels {
    /// Create a decode context for `format` and attach it to `params`
    ///
    /// The decoder must report native support for the format, and a backend
    /// must be registered for it. On success `params.format` becomes
    /// `format`.
    pub fn setup_decode_context(
        &self,
        params: &mut CodecParams,
        format: PixelFormat,
    ) -> HwAccelResult<()> {
        if params.find_hw_config(format).is_none() {
            error!(codec = %params.codec_name, "no HWAccel for the pixel format '{}'", format.name());
            return Err(HwAccelError::FormatNotSupported(format));
        }
        if params.has_hw_context() {
            return Err(HwAccelError::ContextAttached);
        }
        if self.is_shut_down() {
            debug!(codec = %params.codec_name, format = %format, "Backends shut down, no decode context");
            return Err(HwAccelError::NoBackend(format));
        }

        let Some(backend) = self.registry.get_with(format, Capability::SetupDecode) else {
            debug!(codec = %params.codec_name, format = %format, "No decode backend registered");
            return Err(HwAccelError::NoBackend(format));
        };

        let state = backend.setup_decode(params).map_err(|source| {
            error!(
                codec = %params.codec_name,
                backend = backend.name(),
                error = %source,
                "Failed to set up decode context for '{}'",
                format.name()
            );
            HwAccelError::Backend { format, source }
        })?;

        let context = HwContext::new(format, backend.name(), ContextKind::Decode, state);
        info!(
            codec = %params.codec_name,
            context = %context.id(),
            backend = backend.name(),
            "Decode context attached"
        );
        params.attach_context(context);
        params.format = format;
        Ok(())
    }

    /// Release the decode context attached to `params`
    ///
    /// A no-op when no decode context is attached, so it is safe to call any
    /// number of times.
    pub fn close_decode_context(&self, params: &mut CodecParams) {
        self.close_context(params, ContextKind::Decode);
    }

    /// Create an encode context for the record's current format
    ///
    /// Hardware encode is optional: when no backend handles the format, or
    /// the backends are already shut down, the result is
    /// [`EncodeSetup::Software`] and the record is left untouched. A record
    /// that already carries a context is rejected before any of that.
    pub fn setup_encode_context(&self, params: &mut CodecParams) -> HwAccelResult<EncodeSetup> {
        let format = params.format;

        if params.has_hw_context() {
            return Err(HwAccelError::ContextAttached);
        }
        if self.is_shut_down() {
            debug!(codec = %params.codec_name, format = %format, "Backends shut down, software encode");
            return Ok(EncodeSetup::Software);
        }
        let Some(backend) = self.registry.get_with(format, Capability::SetupEncode) else {
            debug!(codec = %params.codec_name, format = %format, "Software encode");
            return Ok(EncodeSetup::Software);
        };

        let state = backend.setup_encode(params).map_err(|source| {
            error!(
                codec = %params.codec_name,
                backend = backend.name(),
                error = %source,
                "Failed to set up encode context for '{}'",
                format.name()
            );
            HwAccelError::Backend { format, source }
        })?;

        let context = HwContext::new(format, backend.name(), ContextKind::Encode, state);
        info!(
            codec = %params.codec_name,
            context = %context.id(),
            backend = backend.name(),
            "Encode context attached"
        );
        params.attach_context(context);
        Ok(EncodeSetup::Hardware)
    }

    /// Release the encode context attached to `params`; no-op when absent
    pub fn close_encode_context(&self, params: &mut CodecParams) {
        self.close_context(params, ContextKind::Encode);
    }

    fn close_context(&self, params: &mut CodecParams, kind: ContextKind) {
        let Some(mut context) = params.detach_context(kind) else {
            if let Some(other) = params.hw_context() {
                warn!(
                    codec = %params.codec_name,
                    attached = %other.kind(),
                    requested = %kind,
                    "Close requested for a context kind that is not attached"
                );
            }
            return;
        };

        if context.format() != params.format {
            warn!(
                context = %context.id(),
                context_format = %context.format(),
                record_format = %params.format,
                "Record format changed while a context was attached"
            );
        }

        // The slot is already empty; the state goes back to its creator once
        let Some(state) = context.take_state() else {
            return;
        };
        let close_cap = match kind {
            ContextKind::Decode => Capability::CloseDecode,
            ContextKind::Encode => Capability::CloseEncode,
        };

        match self.registry.get_with(context.format(), close_cap) {
            Some(backend) => {
                let result = match kind {
                    ContextKind::Decode => backend.close_decode(state),
                    ContextKind::Encode => backend.close_encode(state),
                };
                match result {
                    Ok(()) => info!(
                        codec = %params.codec_name,
                        context = %context.id(),
                        backend = backend.name(),
                        kind = %kind,
                        "Hardware context closed"
                    ),
                    Err(e) => error!(
                        codec = %params.codec_name,
                        context = %context.id(),
                        backend = backend.name(),
                        error = %e,
                        "Failed to close hardware context"
                    ),
                }
            }
            None => {
                debug!(
                    context = %context.id(),
                    backend = context.backend(),
                    kind = %kind,
                    "Backend has no close operation, dropping state"
                );
                drop(state);
            }
        }
    }
}

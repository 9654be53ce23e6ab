// SPDX-License-Identifier: MPL-2.0

//! Decode format negotiation

use super::HwAccels;
use crate::media::formats::PixelFormat;
use crate::media::params::CodecParams;
use tracing::{debug, info, trace};

impl HwAccels {
    /// Pick the hardware pixel format to decode into
    ///
    /// Candidates are tried in decoder order, up to the first
    /// [`PixelFormat::None`] or the end of the slice. A candidate wins when
    /// it is hardware-accelerated, natively supported by the decoder, and its
    /// backend sets up a decode context; that context is left attached to
    /// `params`.
    ///
    /// Returns [`PixelFormat::None`] when nothing qualifies, meaning "decode
    /// in software". A decode context left over from an earlier negotiation
    /// is closed before the scan and `params.format` is reset with it.
    pub fn select_decode_format(
        &self,
        params: &mut CodecParams,
        candidates: &[PixelFormat],
    ) -> PixelFormat {
        if params.has_hw_context() {
            debug!(codec = %params.codec_name, "Renegotiating, closing previous decode context");
            self.close_decode_context(params);
            // The old hardware format no longer has a context behind it
            params.format = PixelFormat::None;
        }

        for &format in candidates
            .iter()
            .take_while(|&&format| format != PixelFormat::None)
        {
            let Some(desc) = format.descriptor() else {
                trace!(codec = %params.codec_name, "hwaccels: skipping unknown format {}", format);
                continue;
            };
            trace!(codec = %params.codec_name, "hwaccels: trying format: {}", desc.name);

            if !desc.is_hwaccel() {
                continue;
            }
            if self.setup_decode_context(params, format).is_ok() {
                info!(codec = %params.codec_name, format = desc.name, "Selected hardware decode format");
                return format;
            }
        }

        debug!(codec = %params.codec_name, "No usable hardware format, falling back to software");
        PixelFormat::None
    }
}

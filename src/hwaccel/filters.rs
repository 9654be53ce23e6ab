// SPDX-License-Identifier: MPL-2.0

//! Filter selection for hardware-resident frames
//!
//! Scale and deinterlace descriptions only make sense while frames live in
//! a hardware context, so both queries require an attached context.

use super::HwAccels;
use crate::backends::{BackendError, Capability, ContextState, HwAccelBackend};
use crate::errors::{HwAccelError, HwAccelResult};
use crate::media::formats::PixelFormat;
use crate::media::params::CodecParams;
use std::sync::Arc;
use tracing::{debug, warn};

impl HwAccels {
    /// Describe a filter scaling hardware frames of `input` to the size of
    /// `output`
    pub fn get_scale_filter(
        &self,
        input: &CodecParams,
        output: &CodecParams,
    ) -> HwAccelResult<String> {
        let (backend, format, state) = self.filter_backend(input, Capability::ScaleFilter)?;
        let filter = backend.scale_filter(state, input, output);
        self.finish_filter(input, format, Capability::ScaleFilter, filter)
    }

    /// Describe a filter deinterlacing hardware frames of `params`
    pub fn get_deint_filter(&self, params: &CodecParams) -> HwAccelResult<String> {
        let (backend, format, state) = self.filter_backend(params, Capability::DeintFilter)?;
        let filter = backend.deint_filter(state, params);
        self.finish_filter(params, format, Capability::DeintFilter, filter)
    }

    /// Backend, creating format and state of the attached context
    fn filter_backend<'a>(
        &'a self,
        params: &'a CodecParams,
        capability: Capability,
    ) -> HwAccelResult<(&'a Arc<dyn HwAccelBackend>, PixelFormat, &'a ContextState)> {
        let context = params.hw_context().ok_or(HwAccelError::NoContext)?;
        let state = context.state().ok_or(HwAccelError::NoContext)?;
        let backend = self
            .registry
            .get_with(context.format(), capability)
            .ok_or(HwAccelError::FilterUnsupported(context.format()))?;
        Ok((backend, context.format(), state))
    }

    fn finish_filter(
        &self,
        params: &CodecParams,
        format: PixelFormat,
        capability: Capability,
        filter: Result<String, BackendError>,
    ) -> HwAccelResult<String> {
        let filter = match filter {
            Ok(filter) => filter,
            Err(BackendError::Unsupported(_)) => {
                return Err(HwAccelError::FilterUnsupported(format));
            }
            Err(source) => {
                warn!(codec = %params.codec_name, filter = %capability, error = %source, "Filter query failed");
                return Err(HwAccelError::Backend { format, source });
            }
        };

        if filter.len() > self.filter_max_len {
            warn!(
                codec = %params.codec_name,
                filter = %capability,
                len = filter.len(),
                max = self.filter_max_len,
                "Filter description too long"
            );
            return Err(HwAccelError::FilterTooLong {
                len: filter.len(),
                max: self.filter_max_len,
            });
        }

        debug!(codec = %params.codec_name, filter = %capability, "Filter: {}", filter);
        Ok(filter)
    }
}

/// Copy a filter description into a fixed-size, NUL-terminated buffer
///
/// Either the whole fragment plus terminator fits, or nothing is written.
/// Returns the fragment length without the terminator.
pub fn copy_filter_description(filter: &str, buf: &mut [u8]) -> HwAccelResult<usize> {
    let bytes = filter.as_bytes();
    if bytes.len() >= buf.len() {
        return Err(HwAccelError::FilterTooLong {
            len: bytes.len(),
            max: buf.len().saturating_sub(1),
        });
    }
    buf[..bytes.len()].copy_from_slice(bytes);
    buf[bytes.len()] = 0;
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_fits() {
        let mut buf = [0xffu8; 16];
        let len = copy_filter_description("scale_vaapi", &mut buf).unwrap();
        assert_eq!(len, 11);
        assert_eq!(&buf[..11], b"scale_vaapi");
        assert_eq!(buf[11], 0);
    }

    #[test]
    fn test_copy_never_truncates() {
        let mut buf = [0xffu8; 11];
        assert_eq!(
            copy_filter_description("scale_vaapi", &mut buf),
            Err(HwAccelError::FilterTooLong { len: 11, max: 10 })
        );
        assert!(buf.iter().all(|&b| b == 0xff), "buffer must be left untouched");
    }

    #[test]
    fn test_copy_into_empty_buffer() {
        let mut buf: [u8; 0] = [];
        assert!(copy_filter_description("", &mut buf).is_err());
    }

    #[test]
    fn test_filters_need_context() {
        let hw = HwAccels::software_only();
        let params = CodecParams::new("h264").with_format(PixelFormat::Vaapi);
        assert_eq!(hw.get_deint_filter(&params), Err(HwAccelError::NoContext));
        assert_eq!(
            hw.get_scale_filter(&params, &params),
            Err(HwAccelError::NoContext)
        );
    }
}

// SPDX-License-Identifier: MPL-2.0

//! Codec parameter record shared with the decoder/encoder collaborator

use crate::backends::ContextState;
use crate::media::formats::{HwDeviceType, PixelFormat};
use std::fmt;
use tracing::warn;
use uuid::Uuid;

/// One native hardware configuration reported by a decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HwConfig {
    /// Hardware pixel format the decoder can output
    pub format: PixelFormat,
    /// Device family that backs the format
    pub device_type: HwDeviceType,
}

impl HwConfig {
    /// Build a configuration for a hardware pixel format
    ///
    /// Returns `None` for formats that are not hardware-backed.
    pub fn for_format(format: PixelFormat) -> Option<Self> {
        format.device_type().map(|device_type| Self {
            format,
            device_type,
        })
    }
}

/// Which direction an attached context serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    Decode,
    Encode,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextKind::Decode => write!(f, "decode"),
            ContextKind::Encode => write!(f, "encode"),
        }
    }
}

/// A live hardware context attached to a codec parameter record
///
/// Not `Clone`: there is exactly one owner, and the state is handed back to
/// the creating backend when the context is closed.
pub struct HwContext {
    id: Uuid,
    format: PixelFormat,
    backend: &'static str,
    kind: ContextKind,
    state: Option<ContextState>,
}

impl HwContext {
    pub(crate) fn new(
        format: PixelFormat,
        backend: &'static str,
        kind: ContextKind,
        state: ContextState,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            format,
            backend,
            kind,
            state: Some(state),
        }
    }

    /// Unique id, used to correlate log lines of one session
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Hardware pixel format whose backend created this context
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Name of the creating backend
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    pub fn kind(&self) -> ContextKind {
        self.kind
    }

    pub(crate) fn state(&self) -> Option<&ContextState> {
        self.state.as_ref()
    }

    pub(crate) fn take_state(&mut self) -> Option<ContextState> {
        self.state.take()
    }
}

impl fmt::Debug for HwContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HwContext")
            .field("id", &self.id)
            .field("format", &self.format)
            .field("backend", &self.backend)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Drop for HwContext {
    fn drop(&mut self) {
        if self.state.is_some() {
            warn!(
                context = %self.id,
                backend = self.backend,
                kind = %self.kind,
                "Hardware context dropped without being closed"
            );
        }
    }
}

/// Negotiated settings of one decode or encode stream
///
/// The pipeline owns the record. The hardware context slot is filled and
/// cleared only by this crate; the pipeline can observe it but never take it.
#[derive(Debug, Default)]
pub struct CodecParams {
    /// Codec name used in diagnostics (e.g. "h264")
    pub codec_name: String,
    /// Currently selected pixel format
    pub format: PixelFormat,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Hardware configurations the codec natively supports
    pub hw_configs: Vec<HwConfig>,
    hw_context: Option<HwContext>,
}

impl CodecParams {
    pub fn new(codec_name: impl Into<String>) -> Self {
        Self {
            codec_name: codec_name.into(),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Declare native decoder support for the given hardware formats
    ///
    /// Software formats are ignored.
    pub fn with_hw_formats(mut self, formats: impl IntoIterator<Item = PixelFormat>) -> Self {
        self.hw_configs
            .extend(formats.into_iter().filter_map(HwConfig::for_format));
        self
    }

    /// Find the decoder's native configuration for a pixel format
    pub fn find_hw_config(&self, format: PixelFormat) -> Option<&HwConfig> {
        self.hw_configs.iter().find(|c| c.format == format)
    }

    /// Whether a hardware context is attached
    pub fn has_hw_context(&self) -> bool {
        self.hw_context.is_some()
    }

    /// The attached hardware context, if any
    pub fn hw_context(&self) -> Option<&HwContext> {
        self.hw_context.as_ref()
    }

    pub(crate) fn attach_context(&mut self, context: HwContext) {
        debug_assert!(self.hw_context.is_none(), "context slot already occupied");
        self.hw_context = Some(context);
    }

    /// Detach the context of the given kind, leaving other kinds in place
    pub(crate) fn detach_context(&mut self, kind: ContextKind) -> Option<HwContext> {
        if self.hw_context.as_ref().is_some_and(|c| c.kind == kind) {
            self.hw_context.take()
        } else {
            None
        }
    }
}

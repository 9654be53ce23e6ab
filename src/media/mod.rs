// SPDX-License-Identifier: MPL-2.0

//! Media types shared with the decoder/encoder collaborator
//!
//! # Modules
//!
//! - [`formats`]: Pixel format catalogue and descriptors
//! - [`params`]: Codec parameter record carrying the hardware context slot

pub mod formats;
pub mod params;

// Re-export commonly used types
pub use formats::PixelFormat;
pub use params::{CodecParams, ContextKind, HwConfig, HwContext};

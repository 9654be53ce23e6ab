// SPDX-License-Identifier: MPL-2.0

//! Hardware acceleration negotiation and context lifecycle
//!
//! This library sits between a transcoding pipeline and pluggable hardware
//! backends. It picks the hardware pixel format a decoder should output,
//! owns the backend context bound to that choice, and describes hardware
//! scale/deinterlace filters for the active backend.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`backends`]: Backend capability interface, registry, and the VA-API backend
//! - [`hwaccel`]: Negotiation, context lifecycle, filter selection, module lifecycle
//! - [`media`]: Pixel formats and the codec parameter record
//! - [`config`]: JSON configuration
//! - [`errors`]: Error types
//!
//! # Example
//!
//! ```no_run
//! use hwaccel::{CodecParams, Config, HwAccels, PixelFormat};
//!
//! let hw = HwAccels::init(&Config::default()).unwrap();
//! let mut params = CodecParams::new("h264")
//!     .with_size(1920, 1080)
//!     .with_hw_formats([PixelFormat::Vaapi]);
//!
//! let format = hw.select_decode_format(&mut params, &[PixelFormat::Vaapi, PixelFormat::Yuv420p]);
//! if format != PixelFormat::None {
//!     let deint = hw.get_deint_filter(&params);
//!     println!("{:?}", deint);
//! }
//! hw.close_decode_context(&mut params);
//! hw.done();
//! ```

pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod hwaccel;
pub mod media;

// Re-export commonly used types
pub use backends::{BackendRegistry, Capability, HwAccelBackend};
pub use config::Config;
pub use errors::{HwAccelError, HwAccelResult};
pub use hwaccel::{EncodeSetup, HwAccels, ShutdownReport, copy_filter_description};
pub use media::{CodecParams, PixelFormat};

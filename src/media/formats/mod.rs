// SPDX-License-Identifier: MPL-2.0

//! Pixel format utilities
//!
//! This module provides the pixel format catalogue used to recognise
//! hardware-accelerated formats during negotiation.

pub mod pixel;

pub use pixel::{HwDeviceType, PixelFormat, PixelFormatDescriptor, PixelFormatFlags};

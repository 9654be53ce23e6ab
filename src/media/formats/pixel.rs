// SPDX-License-Identifier: GPL-3.0-only

//! Pixel format catalogue
//!
//! The description facility used by negotiation: every known pixel format has
//! a [`PixelFormatDescriptor`] carrying its canonical name and capability
//! flags. Hardware formats additionally map to the [`HwDeviceType`] that owns
//! their surfaces.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Pixel formats a decoder may offer or an encoder may be configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// Sentinel: no format / end of a candidate list
    #[default]
    None,

    // ===== Software YUV formats =====
    /// Planar YUV 4:2:0, 8-bit
    Yuv420p,
    /// Planar YUV 4:2:2, 8-bit
    Yuv422p,
    /// Planar YUV 4:4:4, 8-bit
    Yuv444p,
    /// Planar YUV 4:2:0, 10-bit little endian
    Yuv420p10le,
    /// Semi-planar YUV 4:2:0 (Y + interleaved UV)
    Nv12,
    /// Semi-planar YUV 4:2:0, 10-bit in 16-bit words
    P010le,

    // ===== Software RGB formats =====
    /// Packed RGB 8:8:8
    Rgb24,
    /// Packed BGRA 8:8:8:8
    Bgra,

    // ===== Hardware surface formats =====
    /// VA-API surfaces
    Vaapi,
    /// CUDA device memory
    Cuda,
    /// Intel Quick Sync surfaces
    Qsv,
    /// VDPAU surfaces
    Vdpau,
    /// VideoToolbox pixel buffers
    VideoToolbox,
    /// Direct3D 11 textures
    D3d11,
    /// DXVA2 surfaces
    Dxva2Vld,
    /// DRM PRIME buffers
    DrmPrime,
    /// Vulkan images
    Vulkan,
    /// Android MediaCodec buffers
    MediaCodec,

    /// A format value the catalogue knows nothing about
    Unknown(i32),
}

/// Capability flags carried by a pixel format descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelFormatFlags(u32);

impl PixelFormatFlags {
    /// Frames live in hardware memory; the format is opaque to software
    pub const HWACCEL: Self = Self(1 << 0);
    /// Components are stored in separate planes
    pub const PLANAR: Self = Self(1 << 1);
    /// Format is RGB-like rather than YUV
    pub const RGB: Self = Self(1 << 2);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Human-readable description of a known pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormatDescriptor {
    /// Canonical lowercase name (e.g. "vaapi", "yuv420p")
    pub name: &'static str,
    /// Capability flags
    pub flags: PixelFormatFlags,
}

impl PixelFormatDescriptor {
    const fn new(name: &'static str, flags: PixelFormatFlags) -> Self {
        Self { name, flags }
    }

    /// Whether frames of this format are hardware-resident
    pub fn is_hwaccel(&self) -> bool {
        self.flags.contains(PixelFormatFlags::HWACCEL)
    }
}

const HW: PixelFormatFlags = PixelFormatFlags::HWACCEL;
const PLANAR: PixelFormatFlags = PixelFormatFlags::PLANAR;
const RGB: PixelFormatFlags = PixelFormatFlags::RGB;

/// Hardware device families a hardware pixel format belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HwDeviceType {
    Vaapi,
    Cuda,
    Qsv,
    Vdpau,
    VideoToolbox,
    D3d11va,
    Dxva2,
    Drm,
    Vulkan,
    MediaCodec,
}

impl HwDeviceType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vaapi => "vaapi",
            Self::Cuda => "cuda",
            Self::Qsv => "qsv",
            Self::Vdpau => "vdpau",
            Self::VideoToolbox => "videotoolbox",
            Self::D3d11va => "d3d11va",
            Self::Dxva2 => "dxva2",
            Self::Drm => "drm",
            Self::Vulkan => "vulkan",
            Self::MediaCodec => "mediacodec",
        }
    }
}

impl fmt::Display for HwDeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl PixelFormat {
    /// Every format the catalogue describes, software formats first
    pub const ALL: [PixelFormat; 18] = [
        Self::Yuv420p,
        Self::Yuv422p,
        Self::Yuv444p,
        Self::Yuv420p10le,
        Self::Nv12,
        Self::P010le,
        Self::Rgb24,
        Self::Bgra,
        Self::Vaapi,
        Self::Cuda,
        Self::Qsv,
        Self::Vdpau,
        Self::VideoToolbox,
        Self::D3d11,
        Self::Dxva2Vld,
        Self::DrmPrime,
        Self::Vulkan,
        Self::MediaCodec,
    ];

    /// Look up the descriptor for this format
    ///
    /// Returns `None` for the sentinel and for unknown format values.
    pub fn descriptor(&self) -> Option<PixelFormatDescriptor> {
        let desc = match self {
            Self::None | Self::Unknown(_) => return None,
            Self::Yuv420p => PixelFormatDescriptor::new("yuv420p", PLANAR),
            Self::Yuv422p => PixelFormatDescriptor::new("yuv422p", PLANAR),
            Self::Yuv444p => PixelFormatDescriptor::new("yuv444p", PLANAR),
            Self::Yuv420p10le => PixelFormatDescriptor::new("yuv420p10le", PLANAR),
            Self::Nv12 => PixelFormatDescriptor::new("nv12", PLANAR),
            Self::P010le => PixelFormatDescriptor::new("p010le", PLANAR),
            Self::Rgb24 => PixelFormatDescriptor::new("rgb24", RGB),
            Self::Bgra => PixelFormatDescriptor::new("bgra", RGB),
            Self::Vaapi => PixelFormatDescriptor::new("vaapi", HW),
            Self::Cuda => PixelFormatDescriptor::new("cuda", HW),
            Self::Qsv => PixelFormatDescriptor::new("qsv", HW),
            Self::Vdpau => PixelFormatDescriptor::new("vdpau", HW),
            Self::VideoToolbox => PixelFormatDescriptor::new("videotoolbox_vld", HW),
            Self::D3d11 => PixelFormatDescriptor::new("d3d11", HW),
            Self::Dxva2Vld => PixelFormatDescriptor::new("dxva2_vld", HW),
            Self::DrmPrime => PixelFormatDescriptor::new("drm_prime", HW),
            Self::Vulkan => PixelFormatDescriptor::new("vulkan", HW),
            Self::MediaCodec => PixelFormatDescriptor::new("mediacodec", HW),
        };
        Some(desc)
    }

    /// Descriptor name, or a placeholder for formats without a descriptor
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            other => other.descriptor().map(|d| d.name).unwrap_or("<unk>"),
        }
    }

    /// Parse a canonical format name
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        if name == "none" {
            return Some(Self::None);
        }
        // A few common aliases
        let name = match name.as_str() {
            "videotoolbox" => "videotoolbox_vld",
            "dxva2" => "dxva2_vld",
            "drm" => "drm_prime",
            "d3d11va" => "d3d11",
            other => other,
        };
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Whether the catalogue flags this format as hardware-accelerated
    pub fn is_hwaccel(&self) -> bool {
        self.descriptor().is_some_and(|d| d.is_hwaccel())
    }

    /// Hardware device family for hardware formats
    pub fn device_type(&self) -> Option<HwDeviceType> {
        match self {
            Self::Vaapi => Some(HwDeviceType::Vaapi),
            Self::Cuda => Some(HwDeviceType::Cuda),
            Self::Qsv => Some(HwDeviceType::Qsv),
            Self::Vdpau => Some(HwDeviceType::Vdpau),
            Self::VideoToolbox => Some(HwDeviceType::VideoToolbox),
            Self::D3d11 => Some(HwDeviceType::D3d11va),
            Self::Dxva2Vld => Some(HwDeviceType::Dxva2),
            Self::DrmPrime => Some(HwDeviceType::Drm),
            Self::Vulkan => Some(HwDeviceType::Vulkan),
            Self::MediaCodec => Some(HwDeviceType::MediaCodec),
            _ => None,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(value) => write!(f, "<unk:{}>", value),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Error returned when parsing an unrecognised pixel format name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPixelFormat(pub String);

impl fmt::Display for UnknownPixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown pixel format '{}'", self.0)
    }
}

impl std::error::Error for UnknownPixelFormat {}

impl FromStr for PixelFormat {
    type Err = UnknownPixelFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownPixelFormat(s.to_string()))
    }
}

impl Serialize for PixelFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hwaccel_flags() {
        assert!(PixelFormat::Vaapi.is_hwaccel());
        assert!(PixelFormat::Cuda.is_hwaccel());
        assert!(!PixelFormat::Yuv420p.is_hwaccel());
        assert!(!PixelFormat::Nv12.is_hwaccel());
        assert!(!PixelFormat::None.is_hwaccel());
        assert!(!PixelFormat::Unknown(999).is_hwaccel());
    }

    #[test]
    fn test_unknown_has_no_descriptor() {
        assert!(PixelFormat::Unknown(-3).descriptor().is_none());
        assert!(PixelFormat::None.descriptor().is_none());
        assert_eq!(PixelFormat::Unknown(7).name(), "<unk>");
    }

    #[test]
    fn test_name_parsing() {
        assert_eq!("vaapi".parse::<PixelFormat>(), Ok(PixelFormat::Vaapi));
        assert_eq!("VAAPI".parse::<PixelFormat>(), Ok(PixelFormat::Vaapi));
        assert_eq!("none".parse::<PixelFormat>(), Ok(PixelFormat::None));
        assert_eq!(
            "videotoolbox".parse::<PixelFormat>(),
            Ok(PixelFormat::VideoToolbox)
        );
        assert!("bogus".parse::<PixelFormat>().is_err());
    }

    #[test]
    fn test_every_hw_format_has_device_type() {
        for format in PixelFormat::ALL {
            assert_eq!(
                format.is_hwaccel(),
                format.device_type().is_some(),
                "{} device type mismatch",
                format
            );
        }
    }

    #[test]
    fn test_planar_and_rgb_flags() {
        let nv12 = PixelFormat::Nv12.descriptor().unwrap();
        assert!(nv12.flags.contains(PixelFormatFlags::PLANAR));
        let bgra = PixelFormat::Bgra.descriptor().unwrap();
        assert!(bgra.flags.contains(PixelFormatFlags::RGB));
        assert!(!bgra.flags.contains(PixelFormatFlags::HWACCEL));

        let both = PixelFormatFlags::HWACCEL.union(PixelFormatFlags::PLANAR);
        assert!(both.contains(PixelFormatFlags::PLANAR));
        assert!(!PixelFormatFlags::PLANAR.contains(both));
    }
}

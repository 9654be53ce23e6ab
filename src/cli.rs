// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for probing hardware acceleration
//!
//! This module provides command-line functionality for:
//! - Listing registered backends
//! - Listing the pixel format catalogue
//! - Running a negotiation round against a synthetic stream

use hwaccel::media::formats::PixelFormatFlags;
use hwaccel::{Capability, CodecParams, Config, HwAccelError, HwAccels, PixelFormat};
use serde::Serialize;
use std::path::Path;

/// Load the configuration from an explicit path or the default location
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(&path)?,
            None => Config::default(),
        },
    };
    Ok(config)
}

/// List all registered backends
pub fn list_backends(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let hw = HwAccels::init(config)?;

    if hw.registry().is_empty() {
        println!("No hardware backends registered.");
        return Ok(());
    }

    println!("Registered backends:");
    println!();
    for backend in hw.registry().iter() {
        println!("  {} ({})", backend.name(), backend.pixel_format());
        let caps: Vec<&str> = Capability::ALL
            .iter()
            .filter(|cap| backend.supports(**cap))
            .map(|cap| cap.name())
            .collect();
        println!("      Capabilities: {}", caps.join(", "));
        println!();
    }

    hw.done();
    Ok(())
}

/// List the pixel format catalogue
pub fn list_formats() -> Result<(), Box<dyn std::error::Error>> {
    println!("{:<18} {:<10} {}", "FORMAT", "KIND", "DEVICE");
    for format in PixelFormat::ALL {
        let Some(desc) = format.descriptor() else {
            continue;
        };
        let kind = if desc.is_hwaccel() {
            "hardware"
        } else if desc.flags.contains(PixelFormatFlags::RGB) {
            "rgb"
        } else {
            "yuv"
        };
        let device = format.device_type().map(|d| d.name()).unwrap_or("-");
        println!("{:<18} {:<10} {}", desc.name, kind, device);
    }
    Ok(())
}

/// Parameters of a synthetic negotiation round
pub struct NegotiateRequest {
    pub codec: String,
    pub candidates: Vec<PixelFormat>,
    pub native: Vec<PixelFormat>,
    pub width: u32,
    pub height: u32,
    pub out_width: u32,
    pub out_height: u32,
}

#[derive(Serialize)]
struct NegotiateReport {
    codec: String,
    candidates: Vec<PixelFormat>,
    selected: PixelFormat,
    hardware: bool,
    scale_filter: Option<String>,
    deint_filter: Option<String>,
    shutdown_failures: usize,
}

fn filter_or_note(result: Result<String, HwAccelError>) -> Option<String> {
    match result {
        Ok(filter) => Some(filter),
        Err(HwAccelError::NoContext) | Err(HwAccelError::FilterUnsupported(_)) => None,
        Err(e) => {
            tracing::warn!("Filter query failed: {}", e);
            None
        }
    }
}

/// Negotiate, query filters, then tear everything down
pub fn negotiate(
    config: &Config,
    request: NegotiateRequest,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let hw = HwAccels::init(config)?;

    let mut input = CodecParams::new(request.codec.clone())
        .with_size(request.width, request.height)
        .with_hw_formats(request.native.iter().copied());
    let output = CodecParams::new(request.codec.clone()).with_size(request.out_width, request.out_height);

    let selected = hw.select_decode_format(&mut input, &request.candidates);
    let scale_filter = filter_or_note(hw.get_scale_filter(&input, &output));
    let deint_filter = filter_or_note(hw.get_deint_filter(&input));

    hw.close_decode_context(&mut input);
    let shutdown = hw.done();

    let report = NegotiateReport {
        codec: request.codec,
        candidates: request.candidates,
        selected,
        hardware: selected != PixelFormat::None,
        scale_filter,
        deint_filter,
        shutdown_failures: shutdown.failed.len(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Codec:      {}", report.codec);
    println!(
        "Candidates: {}",
        report
            .candidates
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    if report.hardware {
        println!("Selected:   {} (hardware)", report.selected);
    } else {
        println!("Selected:   none (software fallback)");
    }
    println!(
        "Scale:      {}",
        report.scale_filter.as_deref().unwrap_or("unsupported")
    );
    println!(
        "Deint:      {}",
        report.deint_filter.as_deref().unwrap_or("unsupported")
    );
    Ok(())
}

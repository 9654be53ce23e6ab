// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use hwaccel::PixelFormat;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "hwaccel")]
#[command(about = "Probe hardware acceleration negotiation")]
#[command(version = hwaccel::constants::app_info::version())]
struct Cli {
    /// Configuration file (default: ~/.config/hwaccel/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered backends and their capabilities
    Backends,

    /// List known pixel formats
    Formats,

    /// Run decode negotiation on a synthetic stream
    Negotiate {
        /// Codec name used in diagnostics
        #[arg(long, default_value = "h264")]
        codec: String,

        /// Candidate formats in decoder preference order
        #[arg(long, value_delimiter = ',', required = true)]
        candidates: Vec<PixelFormat>,

        /// Hardware formats the decoder supports natively
        #[arg(long, value_delimiter = ',')]
        native: Vec<PixelFormat>,

        /// Input width
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Input height
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Scale target width (default: input width)
        #[arg(long)]
        out_width: Option<u32>,

        /// Scale target height (default: input height)
        #[arg(long)]
        out_height: Option<u32>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=hwaccel=trace, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config = cli::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Backends => cli::list_backends(&config),
        Commands::Formats => cli::list_formats(),
        Commands::Negotiate {
            codec,
            candidates,
            native,
            width,
            height,
            out_width,
            out_height,
            json,
        } => cli::negotiate(
            &config,
            cli::NegotiateRequest {
                codec,
                candidates,
                native,
                width,
                height,
                out_width: out_width.unwrap_or(width),
                out_height: out_height.unwrap_or(height),
            },
            json,
        ),
    }
}

// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use depth_view::config::Config;
use depth_view::constants::{DEFAULT_MAX_DEPTH_M, DEFAULT_MIN_DEPTH_M};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "depth-view")]
#[command(about = "Real-time false-color depth map viewer")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the terminal viewer (default)
    View,

    /// Render a single depth frame to a PNG file
    Snapshot {
        /// Input depth image (16-bit grayscale PNG in mm, EXR in m);
        /// uses the synthetic scene when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file path (default: ~/Pictures/depth-view/DEPTH_TIMESTAMP.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Near bound of the visualized range in meters
        #[arg(long, default_value_t = DEFAULT_MIN_DEPTH_M)]
        min_depth: f32,

        /// Far bound of the visualized range in meters
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH_M)]
        max_depth: f32,

        /// Use the turbo colormap instead of grayscale
        #[arg(long)]
        turbo: bool,

        /// Colorize on the CPU reference path instead of the GPU
        #[arg(long)]
        cpu: bool,
    },

    /// Report the GPU adapter and build version
    Probe,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=depth_view=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Snapshot {
            input,
            output,
            min_depth,
            max_depth,
            turbo,
            cpu,
        }) => cli::snapshot(input, output, min_depth, max_depth, turbo, cpu),
        Some(Commands::Probe) => cli::probe(),
        Some(Commands::View) | None => depth_view::terminal::run(Config::load()),
    }
}

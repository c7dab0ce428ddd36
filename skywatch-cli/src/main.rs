//! Binary crate for the `skywatch` terminal weather dashboard.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Rendering the dashboard sections and chart data for a terminal
//! - The ambient-audio and rain-theme collaborators

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod audio;
mod cli;
mod view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Swallowed fetch failures surface here as warnings; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}

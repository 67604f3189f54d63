//! vial-he CLI
//!
//! Reads and writes per-key analog settings on Vial Hall Effect keyboards.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use vial_he::AppConfig;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers
mod commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    debug!("Loading config from {:?}", config_path);
    let config = AppConfig::load(&config_path)?;
    let device = cli.device.as_deref();

    match cli.command {
        // === Query Commands ===
        Commands::Info { json } => commands::query::info(device, &config, json),
        Commands::Get { row, col } => commands::query::get(device, &config, row, col),
        Commands::Lut { channel } => commands::lut::get(device, &config, channel),
        Commands::Modes => commands::query::modes(),

        // === Set Commands ===
        Commands::Set { row, col, values } => {
            commands::set::set_key(device, &config, row, col, values)
        }
        Commands::SetLut { channel, values } => {
            commands::lut::set(device, &config, channel, values)
        }

        // === Interactive ===
        Commands::Edit {
            layers,
            rows,
            cols,
            encoders,
        } => commands::edit::run(device, &config, layers, rows, cols, encoders),

        // === Utility ===
        Commands::Config { init } => commands::config(&config, &config_path, init),
    }
}

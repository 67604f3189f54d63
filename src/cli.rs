// CLI definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use vial_he_keyboard::LutChannel;

#[derive(Parser)]
#[command(name = "vial-he")]
#[command(author, version, about = "Analog key configuration for Vial Hall Effect keyboards")]
#[command(propagate_version = true)]
pub struct Cli {
    /// hidapi path of the raw-HID interface (overrides device_path in the config)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub device: Option<String>,

    /// Config file path (default: ~/.config/vial-he/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Option values for `set`; fields left out keep the device's value
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct KeyConfigArgs {
    /// Mode (0 normal, 2 rapid trigger, 5 inverted, 8 inverted RT, 10-17 DKS)
    #[arg(short, long)]
    pub mode: Option<u8>,
    /// Actuation point (0-255)
    #[arg(short, long)]
    pub actuation: Option<u8>,
    /// Deadzone (0-255)
    #[arg(short = 'z', long)]
    pub deadzone: Option<u8>,
    /// Up sensitivity (0-255)
    #[arg(short, long)]
    pub up: Option<u8>,
    /// Down sensitivity (0-255)
    #[arg(short = 'w', long)]
    pub down: Option<u8>,
}

/// Parameter values for `set-lut`; parameters left out keep the device's value
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct LutArgs {
    /// Parameter A (-100 to 100)
    #[arg(long, allow_negative_numbers = true)]
    pub a: Option<f64>,
    /// Parameter B (-100 to 100)
    #[arg(long, allow_negative_numbers = true)]
    pub b: Option<f64>,
    /// Parameter C (-100 to 100)
    #[arg(long, allow_negative_numbers = true)]
    pub c: Option<f64>,
    /// Parameter D (-100 to 100)
    #[arg(long, allow_negative_numbers = true)]
    pub d: Option<f64>,
    /// Max input (0-1000)
    #[arg(long)]
    pub max_input: Option<f64>,
    /// Max output (0-1000)
    #[arg(long)]
    pub max_output: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    // === Query Commands ===
    /// Show the opened device's identity
    #[command(visible_alias = "i")]
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read one key's analog configuration
    #[command(visible_aliases = ["read", "g"])]
    Get {
        /// Matrix row
        row: u8,
        /// Matrix column
        col: u8,
    },

    /// Read a LUT channel (displacement, joystick, calibration or 1-3)
    #[command(visible_alias = "l")]
    Lut {
        channel: LutChannel,
    },

    /// List the documented key modes
    #[command(visible_alias = "m")]
    Modes,

    // === Set Commands ===
    /// Write one key's analog configuration
    #[command(visible_aliases = ["write", "s"])]
    Set {
        /// Matrix row
        row: u8,
        /// Matrix column
        col: u8,
        #[command(flatten)]
        values: KeyConfigArgs,
    },

    /// Write a LUT channel
    #[command(visible_alias = "sl")]
    SetLut {
        channel: LutChannel,
        #[command(flatten)]
        values: LutArgs,
    },

    // === Interactive ===
    /// Line-driven editor session (reads commands from stdin)
    #[command(visible_alias = "e")]
    Edit {
        /// Keymap layers
        #[arg(long, default_value = "4")]
        layers: u8,
        /// Matrix rows
        #[arg(long, default_value = "6")]
        rows: u8,
        /// Matrix columns
        #[arg(long, default_value = "15")]
        cols: u8,
        /// Rotary encoders
        #[arg(long, default_value = "0")]
        encoders: u8,
    },

    // === Utility ===
    /// Print the effective configuration
    Config {
        /// Write the defaults to the config file
        #[arg(long)]
        init: bool,
    },
}

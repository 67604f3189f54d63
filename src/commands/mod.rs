//! Command handlers for the CLI application.
//!
//! - `query`: read-only commands (info, get, modes)
//! - `set`: writing a key's analog config
//! - `lut`: LUT channel read/write
//! - `edit`: the line-driven editor session

pub mod edit;
pub mod lut;
pub mod query;
pub mod set;

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use hidapi::HidApi;
use tracing::info;

use vial_he::AppConfig;
use vial_he_keyboard::EditorSession;
use vial_he_transport::{BoxedTransport, HidRawTransport, Transport};

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Open the raw-HID interface given by `--device` or the config file
pub fn open_transport(device: Option<&str>, config: &AppConfig) -> anyhow::Result<BoxedTransport> {
    let Some(path) = device.or(config.device_path.as_deref()) else {
        bail!("No device given: pass --device <PATH> or set device_path in the config file");
    };

    let api = HidApi::new().context("Failed to initialize hidapi")?;
    let mut transport = HidRawTransport::open_path(&api, path)
        .with_context(|| format!("Failed to open {path}"))?;
    transport.set_read_timeout(config.read_timeout_ms);

    let info = transport.device_info();
    info!(
        "Connected to {} ({:04x}:{:04x})",
        info.product_name.as_deref().unwrap_or("Unknown"),
        info.vid,
        info.pid
    );
    Ok(Arc::new(transport))
}

/// Open the device and start an editor session for it
pub fn open_session(device: Option<&str>, config: &AppConfig) -> anyhow::Result<EditorSession> {
    if !config.has_hall_effect {
        bail!("Keyboard is configured without Hall Effect support (has_hall_effect = false)");
    }
    let transport = open_transport(device, config)?;
    Ok(EditorSession::new(transport, config.session_options()))
}

/// Print (or initialize) the configuration file
pub fn config(config: &AppConfig, path: &Path, init: bool) -> CommandResult {
    if init {
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        AppConfig::default().save(path)?;
        println!("Wrote defaults to {}", path.display());
        return Ok(());
    }

    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

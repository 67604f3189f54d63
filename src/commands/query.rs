//! Query command handlers.

use super::{open_session, open_transport, CommandResult};
use vial_he::render;
use vial_he::AppConfig;
use vial_he_keyboard::{KeyMode, SelectionTarget};

/// Show the opened device's identity
pub fn info(device: Option<&str>, config: &AppConfig, json: bool) -> CommandResult {
    let transport = open_transport(device, config)?;
    let info = transport.device_info();

    if json {
        println!("{}", serde_json::to_string_pretty(info)?);
        return Ok(());
    }

    println!("Device: {}", info.display_name());
    println!("  Path:    {}", info.device_path);
    println!("  VID:PID: {:04X}:{:04X}", info.vid, info.pid);
    println!(
        "  Product: {}",
        info.product_name.as_deref().unwrap_or("(unknown)")
    );
    println!("  Serial:  {}", info.serial.as_deref().unwrap_or("(none)"));
    println!("  Vial:    {}", if info.is_vial() { "yes" } else { "no" });
    Ok(())
}

/// Read and print one key's analog configuration
pub fn get(device: Option<&str>, config: &AppConfig, row: u8, col: u8) -> CommandResult {
    let mut session = open_session(device, config)?;
    let outcome = session.select(Some(SelectionTarget::matrix(row, col)))?;

    println!("{}", session.key_label());
    if let Some(cfg) = outcome.displayed {
        for line in render::config_lines(&cfg) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Print the mode legend
pub fn modes() -> CommandResult {
    println!("Key modes:");
    for mode in KeyMode::documented() {
        println!("  {:>2}  {}", mode.to_u8(), mode);
    }
    Ok(())
}

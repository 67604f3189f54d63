//! Editor session command handler.

use std::io;

use super::{open_session, CommandResult};
use vial_he::edit::run_script;
use vial_he::AppConfig;
use vial_he_keyboard::{Keymap, KeymapModel, StaticKeycodeTable};

/// Run an editor session on stdin
pub fn run(
    device: Option<&str>,
    config: &AppConfig,
    layers: u8,
    rows: u8,
    cols: u8,
    encoders: u8,
) -> CommandResult {
    let mut session = open_session(device, config)?;
    let mut keymap = Keymap::grid(layers, rows, cols)
        .with_encoders(encoders)
        .with_hall_effect(&config.hall_effect_tabs);
    let table = StaticKeycodeTable::new();

    let tabs: Vec<String> = session.tabs().iter().map(|t| t.to_string()).collect();
    println!("Tabs: {}", tabs.join(", "));
    println!(
        "{} layers, {} keys, {} encoders",
        keymap.layers(),
        keymap.keys().len(),
        keymap.encoders().len()
    );
    println!("{}", session.key_label());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_script(&mut session, &mut keymap, &table, stdin.lock(), &mut stdout)
}

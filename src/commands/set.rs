//! Setting command handlers.

use tracing::debug;

use super::{open_session, CommandResult};
use crate::cli::KeyConfigArgs;
use vial_he::render;
use vial_he::AppConfig;
use vial_he_keyboard::{AnalogField, SelectionTarget, SetPendingField};

impl KeyConfigArgs {
    /// Staging commands for the fields given on the command line
    fn to_commands(self) -> Vec<SetPendingField> {
        [
            (AnalogField::Mode, self.mode),
            (AnalogField::ActuationPoint, self.actuation),
            (AnalogField::Deadzone, self.deadzone),
            (AnalogField::UpSensitivity, self.up),
            (AnalogField::DownSensitivity, self.down),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| SetPendingField::new(field, v)))
        .collect()
    }
}

/// Write one key's analog configuration
///
/// Runs the same click sequence as the editor: the first selection reads the
/// key, the fetched values are staged and overridden by the given fields,
/// and the second selection commits and reads back.
pub fn set_key(
    device: Option<&str>,
    config: &AppConfig,
    row: u8,
    col: u8,
    values: KeyConfigArgs,
) -> CommandResult {
    let commands = values.to_commands();
    if commands.is_empty() {
        anyhow::bail!(
            "Nothing to set: give at least one of --mode, --actuation, --deadzone, --up, --down"
        );
    }

    let mut session = open_session(device, config)?;
    let key = SelectionTarget::matrix(row, col);

    let before = session.select(Some(key))?;
    if let Some(cfg) = before.displayed {
        debug!("Current: {}", render::config_summary(&cfg));
        session.store_mut().stage_from(&cfg);
    }
    for cmd in commands {
        session.apply(cmd)?;
    }

    let after = session.select(Some(key))?;
    if let Some(cfg) = after.committed {
        println!("{}: wrote {}", session.key_label(), render::config_summary(&cfg));
    }
    if let Some(cfg) = after.displayed {
        println!("Read back:");
        for line in render::config_lines(&cfg) {
            println!("{line}");
        }
    }
    Ok(())
}

//! LUT channel command handlers.

use super::{open_session, CommandResult};
use crate::cli::LutArgs;
use vial_he::render;
use vial_he::AppConfig;
use vial_he_keyboard::{LutChannel, LutField};

/// Read and print a LUT channel
pub fn get(device: Option<&str>, config: &AppConfig, channel: LutChannel) -> CommandResult {
    let mut session = open_session(device, config)?;
    let cfg = session.store_mut().fetch_lut(channel)?;

    println!("{} LUT (channel {}):", channel, channel.id());
    for line in render::lut_lines(&cfg) {
        println!("{line}");
    }
    Ok(())
}

/// Write a LUT channel; unspecified parameters keep the device's values
pub fn set(
    device: Option<&str>,
    config: &AppConfig,
    channel: LutChannel,
    values: LutArgs,
) -> CommandResult {
    let given: Vec<(LutField, f64)> = [
        (LutField::ParameterA, values.a),
        (LutField::ParameterB, values.b),
        (LutField::ParameterC, values.c),
        (LutField::ParameterD, values.d),
        (LutField::MaxInput, values.max_input),
        (LutField::MaxOutput, values.max_output),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.map(|v| (field, v)))
    .collect();
    if given.is_empty() {
        anyhow::bail!("Nothing to set: give at least one LUT parameter");
    }

    let mut session = open_session(device, config)?;
    let store = session.store_mut();
    store.fetch_lut(channel)?;
    for (field, value) in given {
        store.set_pending_lut(channel, field, value)?;
    }
    let written = store.commit_lut(channel)?;

    println!("{} LUT (channel {}) written:", channel, channel.id());
    for line in render::lut_lines(&written) {
        println!("{line}");
    }
    Ok(())
}

//! Line-driven editor session
//!
//! Each input line is one event:
//!
//! ```text
//! 1,2            click matrix key row 1, col 2
//! enc 0,1        click encoder 0, direction 1
//! none           click empty space
//! mode 5         stage an option value (mode, actuation, deadzone, up, down)
//! layer 1        switch layer
//! kc KC_A        assign a keycode to the active key
//! mask KC_A      assign only the inner code of the active key's wrapper
//! show           print the active key and staged values
//! quit
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::warn;
use vial_he_keyboard::{
    AnalogField, EditorSession, KeycodeTable, KeymapModel, SelectionOutcome, SelectionTarget,
    SetPendingField,
};

use crate::render;

/// One editor event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Select(Option<SelectionTarget>),
    Stage(SetPendingField),
    Layer(u8),
    Keycode { code: String, masked: bool },
    Show,
    Quit,
}

fn parse_pair(s: &str) -> Result<(u8, u8), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected <a>,<b>, got \"{s}\""))?;
    let a = a.trim().parse::<u8>().map_err(|e| format!("{a}: {e}"))?;
    let b = b.trim().parse::<u8>().map_err(|e| format!("{b}: {e}"))?;
    Ok((a, b))
}

impl FromStr for EditCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((h, r)) => (h, r.trim()),
            None => (line, ""),
        };

        match (head.to_ascii_lowercase().as_str(), rest) {
            ("quit" | "exit" | "q", "") => Ok(Self::Quit),
            ("none", "") => Ok(Self::Select(None)),
            ("show", "") => Ok(Self::Show),
            ("enc" | "encoder", pair) => {
                let (index, direction) = parse_pair(pair)?;
                Ok(Self::Select(Some(SelectionTarget::encoder(index, direction))))
            }
            ("layer", n) => n
                .parse::<u8>()
                .map(Self::Layer)
                .map_err(|e| format!("layer {n}: {e}")),
            ("kc" | "mask", code) if !code.is_empty() => Ok(Self::Keycode {
                code: code.to_string(),
                masked: head.eq_ignore_ascii_case("mask"),
            }),
            _ if head.contains(',') => {
                let (row, col) = parse_pair(line)?;
                Ok(Self::Select(Some(SelectionTarget::matrix(row, col))))
            }
            (_, value) if !value.is_empty() => {
                let field: AnalogField = head.parse()?;
                let value = value
                    .parse::<u8>()
                    .map_err(|_| format!("{field} must be 0-255, got \"{value}\""))?;
                Ok(Self::Stage(SetPendingField::new(field, value)))
            }
            _ => Err(format!("unrecognised command: \"{line}\"")),
        }
    }
}

fn print_outcome<W: Write>(
    out: &mut W,
    session: &EditorSession,
    outcome: &SelectionOutcome,
) -> std::io::Result<()> {
    match outcome.target {
        Some(target) if !target.is_matrix() => {
            writeln!(out, "{} ({target}, click {})", session.key_label(), outcome.repeat_count)?
        }
        Some(_) => writeln!(out, "{} (click {})", session.key_label(), outcome.repeat_count)?,
        None => writeln!(out, "{}", session.key_label())?,
    }
    if let Some(cfg) = outcome.committed {
        writeln!(out, "  wrote {}", render::config_summary(&cfg))?;
    }
    if let Some(cfg) = outcome.displayed {
        for line in render::config_lines(&cfg) {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

fn print_state<W: Write>(
    out: &mut W,
    session: &EditorSession,
    keymap: &dyn KeymapModel,
    table: &dyn KeycodeTable,
) -> std::io::Result<()> {
    writeln!(out, "{} (layer {})", session.key_label(), session.layer())?;
    if let Some(code) = session.keycode_for_display(keymap, table, false) {
        writeln!(out, "  keycode: {code}")?;
    }
    let pending = session.store().pending();
    let staged: Vec<String> = AnalogField::ALL
        .iter()
        .filter_map(|f| pending.get(*f).map(|v| format!("{}={v}", f.label())))
        .collect();
    if staged.is_empty() {
        writeln!(out, "  staged: (none)")?;
    } else {
        writeln!(out, "  staged: {}", staged.join(", "))?;
    }
    Ok(())
}

/// Run editor commands from `input` until EOF or `quit`
///
/// Parse and device errors are reported on `out` and the session carries on.
pub fn run_script<R: BufRead, W: Write>(
    session: &mut EditorSession,
    keymap: &mut dyn KeymapModel,
    table: &dyn KeycodeTable,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let cmd = match trimmed.parse::<EditCommand>() {
            Ok(cmd) => cmd,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };

        match cmd {
            EditCommand::Quit => break,
            EditCommand::Select(target) => match session.select(target) {
                Ok(outcome) => print_outcome(out, session, &outcome)?,
                Err(e) => {
                    warn!("Selection failed: {}", e);
                    writeln!(out, "error: {e}")?;
                }
            },
            EditCommand::Stage(cmd) => match session.apply(cmd) {
                Ok(()) => writeln!(out, "  staged {} = {}", cmd.field, cmd.value)?,
                Err(e) => writeln!(out, "error: {e}")?,
            },
            EditCommand::Layer(layer) => {
                if layer >= keymap.layers() {
                    writeln!(out, "error: layer {layer} out of range")?;
                } else {
                    session.switch_layer(layer);
                    writeln!(out, "Layer {layer}")?;
                }
            }
            EditCommand::Keycode { code, masked } => {
                match session.set_keycode(keymap, table, &code, masked) {
                    Ok(Some(stored)) => writeln!(out, "  set {stored}")?,
                    Ok(None) => writeln!(out, "  unchanged")?,
                    Err(e) => writeln!(out, "error: {e}")?,
                }
                writeln!(out, "{}", session.key_label())?;
            }
            EditCommand::Show => print_state(out, session, keymap, table)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(
            "1,2".parse::<EditCommand>(),
            Ok(EditCommand::Select(Some(SelectionTarget::matrix(1, 2))))
        );
        assert_eq!(
            " 3, 14 ".parse::<EditCommand>(),
            Ok(EditCommand::Select(Some(SelectionTarget::matrix(3, 14))))
        );
        assert_eq!(
            "enc 0,1".parse::<EditCommand>(),
            Ok(EditCommand::Select(Some(SelectionTarget::encoder(0, 1))))
        );
        assert_eq!("none".parse::<EditCommand>(), Ok(EditCommand::Select(None)));
    }

    #[test]
    fn test_parse_stage() {
        assert_eq!(
            "mode 5".parse::<EditCommand>(),
            Ok(EditCommand::Stage(SetPendingField::new(AnalogField::Mode, 5)))
        );
        assert_eq!(
            "Deadzone 255".parse::<EditCommand>(),
            Ok(EditCommand::Stage(SetPendingField::new(
                AnalogField::Deadzone,
                255
            )))
        );
        assert!("mode 256".parse::<EditCommand>().is_err());
        assert!("travel 3".parse::<EditCommand>().is_err());
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!("layer 2".parse::<EditCommand>(), Ok(EditCommand::Layer(2)));
        assert_eq!(
            "mask KC_B".parse::<EditCommand>(),
            Ok(EditCommand::Keycode {
                code: "KC_B".into(),
                masked: true
            })
        );
        assert_eq!("quit".parse::<EditCommand>(), Ok(EditCommand::Quit));
        assert!("kc".parse::<EditCommand>().is_err());
        assert!("1,x".parse::<EditCommand>().is_err());
    }
}

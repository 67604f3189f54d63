//! Text output shared by the commands

use vial_he_keyboard::{AnalogConfig, AnalogField, KeyMode, LutChannelConfig, LutField};

/// One line per analog field, e.g. `  Mode:             2 (Rapid Trigger)`
pub fn config_lines(config: &AnalogConfig) -> Vec<String> {
    AnalogField::ALL
        .iter()
        .map(|field| {
            let value = field.get(config);
            match field {
                AnalogField::Mode => format!(
                    "  {:<17} {} ({})",
                    format!("{}:", field.label()),
                    value,
                    KeyMode::from_u8(value)
                ),
                _ => format!("  {:<17} {}", format!("{}:", field.label()), value),
            }
        })
        .collect()
}

/// Compact single-line form
pub fn config_summary(config: &AnalogConfig) -> String {
    format!(
        "mode={} actuation={} deadzone={} up={} down={}",
        config.mode,
        config.actuation_point,
        config.deadzone,
        config.up_sensitivity,
        config.down_sensitivity
    )
}

pub fn lut_lines(config: &LutChannelConfig) -> Vec<String> {
    LutField::ALL
        .iter()
        .map(|field| format!("  {:<12} {}", format!("{}:", field.label()), field.get(config)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_lines() {
        let cfg = AnalogConfig {
            mode: 2,
            actuation_point: 30,
            deadzone: 5,
            up_sensitivity: 10,
            down_sensitivity: 12,
        };
        let lines = config_lines(&cfg);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "  Mode:             2 (Rapid Trigger)");
        assert_eq!(lines[1], "  Actuation Point:  30");
        assert_eq!(
            config_summary(&cfg),
            "mode=2 actuation=30 deadzone=5 up=10 down=12"
        );
    }
}

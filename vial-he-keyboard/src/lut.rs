//! Lookup-table (LUT) channel types for the Displacement / Joystick / Calibration tabs

use std::fmt;
use std::str::FromStr;

use vial_he_transport::LutChannelConfig;

/// Analog response curve channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LutChannel {
    Displacement,
    Joystick,
    Calibration,
}

impl LutChannel {
    pub const ALL: [LutChannel; 3] = [
        LutChannel::Displacement,
        LutChannel::Joystick,
        LutChannel::Calibration,
    ];

    /// Channel id on the wire
    pub fn id(self) -> u8 {
        match self {
            Self::Displacement => 1,
            Self::Joystick => 2,
            Self::Calibration => 3,
        }
    }

    /// Convert from wire channel id
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Displacement),
            2 => Some(Self::Joystick),
            3 => Some(Self::Calibration),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Displacement => "Displacement",
            Self::Joystick => "Joystick",
            Self::Calibration => "Calibration",
        }
    }
}

impl fmt::Display for LutChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LutChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.parse::<u8>() {
            return Self::from_id(id).ok_or_else(|| format!("unknown LUT channel id: {id}"));
        }
        match s.to_ascii_lowercase().as_str() {
            "displacement" => Ok(Self::Displacement),
            "joystick" => Ok(Self::Joystick),
            "calibration" => Ok(Self::Calibration),
            _ => Err(format!(
                "unknown LUT channel: \"{s}\". Use 1-3 or displacement/joystick/calibration"
            )),
        }
    }
}

/// One LUT curve parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LutField {
    ParameterA,
    ParameterB,
    ParameterC,
    ParameterD,
    MaxInput,
    MaxOutput,
}

impl LutField {
    pub const ALL: [LutField; 6] = [
        LutField::ParameterA,
        LutField::ParameterB,
        LutField::ParameterC,
        LutField::ParameterD,
        LutField::MaxInput,
        LutField::MaxOutput,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ParameterA => "Parameter A",
            Self::ParameterB => "Parameter B",
            Self::ParameterC => "Parameter C",
            Self::ParameterD => "Parameter D",
            Self::MaxInput => "Max Input",
            Self::MaxOutput => "Max Output",
        }
    }

    /// Accepted value range (inclusive)
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::MaxInput | Self::MaxOutput => (0.0, 1000.0),
            _ => (-100.0, 100.0),
        }
    }

    /// Check a value against [`LutField::range`]
    pub fn validate(self, value: f64) -> Result<f64, String> {
        let (min, max) = self.range();
        if value.is_finite() && (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(format!("{} must be in {min}..={max}, got {value}", self.label()))
        }
    }

    pub fn get(self, config: &LutChannelConfig) -> f64 {
        match self {
            Self::ParameterA => config.parameter_a,
            Self::ParameterB => config.parameter_b,
            Self::ParameterC => config.parameter_c,
            Self::ParameterD => config.parameter_d,
            Self::MaxInput => config.max_input,
            Self::MaxOutput => config.max_output,
        }
    }

    pub fn set(self, config: &mut LutChannelConfig, value: f64) {
        match self {
            Self::ParameterA => config.parameter_a = value,
            Self::ParameterB => config.parameter_b = value,
            Self::ParameterC => config.parameter_c = value,
            Self::ParameterD => config.parameter_d = value,
            Self::MaxInput => config.max_input = value,
            Self::MaxOutput => config.max_output = value,
        }
    }
}

impl fmt::Display for LutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Staged LUT values for one channel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendingLut {
    values: [Option<f64>; 6],
}

impl PendingLut {
    pub fn stage(&mut self, field: LutField, value: f64) {
        self.values[Self::index(field)] = Some(value);
    }

    pub fn get(&self, field: LutField) -> Option<f64> {
        self.values[Self::index(field)]
    }

    /// Build the config to write, filling unstaged fields from `base`
    pub fn resolve(&self, base: &LutChannelConfig) -> LutChannelConfig {
        let mut config = *base;
        for field in LutField::ALL {
            if let Some(v) = self.get(field) {
                field.set(&mut config, v);
            }
        }
        config
    }

    fn index(field: LutField) -> usize {
        match field {
            LutField::ParameterA => 0,
            LutField::ParameterB => 1,
            LutField::ParameterC => 2,
            LutField::ParameterD => 3,
            LutField::MaxInput => 4,
            LutField::MaxOutput => 5,
        }
    }
}

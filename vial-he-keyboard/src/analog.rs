//! Analog (Hall Effect) actuation types: key modes, editable fields and staged edits

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vial_he_transport::AnalogConfig;

/// Key actuation mode
///
/// The firmware treats the mode byte as an opaque enumerant; this is the
/// editor's view of the documented buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// Fixed actuation point
    #[default]
    Normal,
    /// Re-triggers on direction change rather than a fixed point
    RapidTrigger,
    /// Actuates on release past the point
    InvertedActuation,
    /// Rapid trigger with inverted direction
    InvertedRapidTrigger,
    /// Dynamic keystroke slot 1-8
    Dks(u8),
    /// Any other firmware value
    Unknown(u8),
}

/// First mode byte of the DKS range (DKS 1)
const DKS_BASE: u8 = 10;
/// Number of DKS slots
const DKS_SLOTS: u8 = 8;

impl KeyMode {
    /// Parse from protocol value
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Normal,
            2 => Self::RapidTrigger,
            5 => Self::InvertedActuation,
            8 => Self::InvertedRapidTrigger,
            v if (DKS_BASE..DKS_BASE + DKS_SLOTS).contains(&v) => Self::Dks(v - DKS_BASE + 1),
            v => Self::Unknown(v),
        }
    }

    /// Convert to protocol value
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::RapidTrigger => 2,
            Self::InvertedActuation => 5,
            Self::InvertedRapidTrigger => 8,
            Self::Dks(slot) => DKS_BASE + slot.clamp(1, DKS_SLOTS) - 1,
            Self::Unknown(v) => v,
        }
    }

    /// The documented modes, in display order
    pub fn documented() -> impl Iterator<Item = KeyMode> {
        [
            Self::Normal,
            Self::RapidTrigger,
            Self::InvertedActuation,
            Self::InvertedRapidTrigger,
        ]
        .into_iter()
        .chain((1..=DKS_SLOTS).map(Self::Dks))
    }
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("Normal Actuation"),
            Self::RapidTrigger => f.write_str("Rapid Trigger"),
            Self::InvertedActuation => f.write_str("Inverted Actuation"),
            Self::InvertedRapidTrigger => f.write_str("Inverted Rapid Trigger"),
            Self::Dks(slot) => write!(f, "DKS {slot}"),
            Self::Unknown(v) => write!(f, "Unknown ({v})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Editable fields
// ---------------------------------------------------------------------------

/// One of the five per-key option fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalogField {
    Mode,
    ActuationPoint,
    Deadzone,
    UpSensitivity,
    DownSensitivity,
}

impl AnalogField {
    /// All fields in wire/display order
    pub const ALL: [AnalogField; 5] = [
        AnalogField::Mode,
        AnalogField::ActuationPoint,
        AnalogField::Deadzone,
        AnalogField::UpSensitivity,
        AnalogField::DownSensitivity,
    ];

    /// Option label
    pub fn label(self) -> &'static str {
        match self {
            Self::Mode => "Mode",
            Self::ActuationPoint => "Actuation Point",
            Self::Deadzone => "Deadzone",
            Self::UpSensitivity => "Up Sensitivity",
            Self::DownSensitivity => "Down Sensitivity",
        }
    }

    /// Read this field from a config
    pub fn get(self, config: &AnalogConfig) -> u8 {
        match self {
            Self::Mode => config.mode,
            Self::ActuationPoint => config.actuation_point,
            Self::Deadzone => config.deadzone,
            Self::UpSensitivity => config.up_sensitivity,
            Self::DownSensitivity => config.down_sensitivity,
        }
    }

    /// Write this field into a config
    pub fn set(self, config: &mut AnalogConfig, value: u8) {
        match self {
            Self::Mode => config.mode = value,
            Self::ActuationPoint => config.actuation_point = value,
            Self::Deadzone => config.deadzone = value,
            Self::UpSensitivity => config.up_sensitivity = value,
            Self::DownSensitivity => config.down_sensitivity = value,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Mode => 0,
            Self::ActuationPoint => 1,
            Self::Deadzone => 2,
            Self::UpSensitivity => 3,
            Self::DownSensitivity => 4,
        }
    }
}

impl fmt::Display for AnalogField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AnalogField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "mode" => Ok(Self::Mode),
            "actuation" | "actuation_point" => Ok(Self::ActuationPoint),
            "deadzone" => Ok(Self::Deadzone),
            "up" | "up_sensitivity" => Ok(Self::UpSensitivity),
            "down" | "down_sensitivity" => Ok(Self::DownSensitivity),
            _ => Err(format!(
                "unknown field: \"{s}\". Use mode, actuation, deadzone, up or down"
            )),
        }
    }
}

/// Command object: stage one option value without touching the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPendingField {
    pub field: AnalogField,
    pub value: u8,
}

impl SetPendingField {
    pub fn new(field: AnalogField, value: u8) -> Self {
        Self { field, value }
    }
}

// ---------------------------------------------------------------------------
// Staged values
// ---------------------------------------------------------------------------

/// How fields the user never staged are filled when committing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillPolicy {
    /// Unstaged fields are written as 0
    #[default]
    Zero,
    /// Unstaged fields keep the value last read from the device
    LastFetched,
}

/// Option values staged for the next commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingConfig {
    values: [Option<u8>; 5],
}

impl PendingConfig {
    /// Stage a single field
    pub fn stage(&mut self, field: AnalogField, value: u8) {
        self.values[field.index()] = Some(value);
    }

    /// Stage every field from a config
    pub fn stage_all(&mut self, config: &AnalogConfig) {
        for field in AnalogField::ALL {
            self.stage(field, field.get(config));
        }
    }

    /// Staged value of a field, if any
    pub fn get(&self, field: AnalogField) -> Option<u8> {
        self.values[field.index()]
    }

    /// Whether nothing has been staged yet
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Build the config to write
    ///
    /// `fetched` is the last configuration read from the device; it is only
    /// consulted under [`FillPolicy::LastFetched`].
    pub fn resolve(&self, policy: FillPolicy, fetched: Option<&AnalogConfig>) -> AnalogConfig {
        let mut config = AnalogConfig::default();
        for field in AnalogField::ALL {
            let fallback = match (policy, fetched) {
                (FillPolicy::LastFetched, Some(cfg)) => field.get(cfg),
                _ => 0,
            };
            field.set(&mut config, self.get(field).unwrap_or(fallback));
        }
        config
    }
}

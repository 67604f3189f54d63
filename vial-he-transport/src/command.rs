//! Type-safe command builders and response parsers
//!
//! Every sub-command of the analog configuration channel is a type implementing
//! [`HidCommand`]; every response a type implementing [`HidResponse`]. The free
//! `encode_*` / `decode_*` functions are the byte-level entry points used by
//! the keyboard layer.

use serde::{Deserialize, Serialize};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::ProtocolError;
use crate::protocol::{self, sub_cmd, RESPONSE_PAYLOAD_OFFSET};

// =============================================================================
// Core Traits
// =============================================================================

/// A request that can be serialized to a command frame
pub trait HidCommand {
    /// Sub-command byte (e.g., 0x01 for GET_KEY_CONFIG)
    const SUB_CMD: u8;

    /// Serialize the payload (bytes after the 3-byte header)
    fn to_payload(&self) -> Vec<u8>;

    /// Build the complete frame `[0xFF, SUB_CMD, 0x00, payload...]`
    fn build(&self) -> Vec<u8> {
        protocol::build_frame(Self::SUB_CMD, &self.to_payload())
    }
}

/// A response that can be parsed from a raw reply buffer
pub trait HidResponse: Sized {
    /// Minimum response length required
    const MIN_LEN: usize;

    /// Parse from response bytes; `data.len() >= MIN_LEN` is guaranteed
    fn from_data(data: &[u8]) -> Result<Self, ProtocolError>;

    /// Parse with length validation
    fn parse(data: &[u8]) -> Result<Self, ProtocolError> {
        if data.len() < Self::MIN_LEN {
            return Err(ProtocolError::ShortResponse {
                expected: Self::MIN_LEN,
                got: data.len(),
            });
        }
        Self::from_data(data)
    }
}

// =============================================================================
// Key analog configuration (sub-commands 1 and 2)
// =============================================================================

/// Per-key analog actuation parameters as stored by the firmware.
///
/// Field order is the wire order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    IntoBytes,
    FromBytes,
    KnownLayout,
    Immutable,
)]
#[repr(C)]
pub struct AnalogConfig {
    /// Actuation mode; opaque to the protocol (see `KeyMode` in the keyboard crate)
    pub mode: u8,
    /// Travel at which the key registers
    pub actuation_point: u8,
    /// Travel band near rest ignored for actuation
    pub deadzone: u8,
    /// Release sensitivity
    pub up_sensitivity: u8,
    /// Press sensitivity
    pub down_sensitivity: u8,
}

/// Wire size of [`AnalogConfig`]
pub const ANALOG_CONFIG_LEN: usize = 5;

/// GET_KEY_CONFIG (0x01) request: row, col
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct GetKeyConfig {
    pub row: u8,
    pub col: u8,
}

impl HidCommand for GetKeyConfig {
    const SUB_CMD: u8 = sub_cmd::GET_KEY_CONFIG;

    fn to_payload(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

/// SET_KEY_CONFIG (0x02) request: row, col, then the 5 config bytes
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct SetKeyConfig {
    pub row: u8,
    pub col: u8,
    pub config: AnalogConfig,
}

impl HidCommand for SetKeyConfig {
    const SUB_CMD: u8 = sub_cmd::SET_KEY_CONFIG;

    fn to_payload(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

/// GET_KEY_CONFIG response: config bytes at offsets 5..10
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyConfigResponse {
    pub config: AnalogConfig,
}

impl HidResponse for KeyConfigResponse {
    const MIN_LEN: usize = RESPONSE_PAYLOAD_OFFSET + ANALOG_CONFIG_LEN;

    fn from_data(data: &[u8]) -> Result<Self, ProtocolError> {
        let bytes = &data[RESPONSE_PAYLOAD_OFFSET..Self::MIN_LEN];
        let config =
            AnalogConfig::read_from_bytes(bytes).map_err(|_| ProtocolError::ShortResponse {
                expected: Self::MIN_LEN,
                got: data.len(),
            })?;
        Ok(Self { config })
    }
}

/// Build a GET_KEY_CONFIG frame: `[0xFF, 1, 0x00, row, col]`
pub fn encode_get_key_config(row: u8, col: u8) -> Vec<u8> {
    GetKeyConfig { row, col }.build()
}

/// Build a SET_KEY_CONFIG frame (10 bytes)
pub fn encode_set_key_config(row: u8, col: u8, config: &AnalogConfig) -> Vec<u8> {
    SetKeyConfig {
        row,
        col,
        config: *config,
    }
    .build()
}

/// Decode a GET_KEY_CONFIG response
pub fn decode_key_config(response: &[u8]) -> Result<AnalogConfig, ProtocolError> {
    KeyConfigResponse::parse(response).map(|r| r.config)
}

// =============================================================================
// LUT channel configuration (sub-commands 3 and 4)
// =============================================================================

/// Curve parameters of one LUT channel.
///
/// Carried on the wire as six little-endian `f32` values so a SET frame
/// (4 + 24 bytes) fits one 32-byte report.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LutChannelConfig {
    pub parameter_a: f64,
    pub parameter_b: f64,
    pub parameter_c: f64,
    pub parameter_d: f64,
    pub max_input: f64,
    pub max_output: f64,
}

/// Number of `f32` parameters in a LUT payload
pub const LUT_PARAM_COUNT: usize = 6;

impl LutChannelConfig {
    fn to_wire(self) -> Vec<u8> {
        [
            self.parameter_a,
            self.parameter_b,
            self.parameter_c,
            self.parameter_d,
            self.max_input,
            self.max_output,
        ]
        .iter()
        .flat_map(|&v| (v as f32).to_le_bytes())
        .collect()
    }

    fn from_wire(bytes: &[u8]) -> Self {
        let mut values = bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64);
        let mut next = || values.next().unwrap_or(0.0);
        Self {
            parameter_a: next(),
            parameter_b: next(),
            parameter_c: next(),
            parameter_d: next(),
            max_input: next(),
            max_output: next(),
        }
    }
}

/// GET_LUT_CONFIG (0x03) request: channel id
#[derive(Debug, Clone, Copy)]
pub struct GetLutConfig {
    pub channel: u8,
}

impl HidCommand for GetLutConfig {
    const SUB_CMD: u8 = sub_cmd::GET_LUT_CONFIG;

    fn to_payload(&self) -> Vec<u8> {
        vec![self.channel]
    }
}

/// SET_LUT_CONFIG (0x04) request: channel id + six parameters
#[derive(Debug, Clone, Copy)]
pub struct SetLutConfig {
    pub channel: u8,
    pub config: LutChannelConfig,
}

impl HidCommand for SetLutConfig {
    const SUB_CMD: u8 = sub_cmd::SET_LUT_CONFIG;

    fn to_payload(&self) -> Vec<u8> {
        let mut data = vec![self.channel];
        data.extend(self.config.to_wire());
        data
    }
}

/// GET_LUT_CONFIG response: six `f32` values from offset 5
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LutConfigResponse {
    pub config: LutChannelConfig,
}

impl HidResponse for LutConfigResponse {
    const MIN_LEN: usize = RESPONSE_PAYLOAD_OFFSET + LUT_PARAM_COUNT * 4;

    fn from_data(data: &[u8]) -> Result<Self, ProtocolError> {
        Ok(Self {
            config: LutChannelConfig::from_wire(&data[RESPONSE_PAYLOAD_OFFSET..Self::MIN_LEN]),
        })
    }
}

/// Build a GET_LUT_CONFIG frame: `[0xFF, 3, 0x00, channel]`
pub fn encode_get_lut_config(channel: u8) -> Vec<u8> {
    GetLutConfig { channel }.build()
}

/// Build a SET_LUT_CONFIG frame (28 bytes)
pub fn encode_set_lut_config(channel: u8, config: &LutChannelConfig) -> Vec<u8> {
    SetLutConfig {
        channel,
        config: *config,
    }
    .build()
}

/// Decode a GET_LUT_CONFIG response
pub fn decode_lut_config(response: &[u8]) -> Result<LutChannelConfig, ProtocolError> {
    LutConfigResponse::parse(response).map(|r| r.config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::MESSAGE_SIZE;

    fn sample() -> AnalogConfig {
        AnalogConfig {
            mode: 2,
            actuation_point: 30,
            deadzone: 5,
            up_sensitivity: 10,
            down_sensitivity: 12,
        }
    }

    /// A device reply padded to a full report, payload at offset 5
    fn fake_response(payload: &[u8]) -> Vec<u8> {
        let mut resp = vec![0u8; MESSAGE_SIZE];
        resp[..3].copy_from_slice(&[0xFF, sub_cmd::GET_KEY_CONFIG, 0x00]);
        resp[RESPONSE_PAYLOAD_OFFSET..RESPONSE_PAYLOAD_OFFSET + payload.len()]
            .copy_from_slice(payload);
        resp
    }

    #[test]
    fn test_get_key_config_frame() {
        assert_eq!(encode_get_key_config(1, 2), vec![0xFF, 0x01, 0x00, 1, 2]);
    }

    #[test]
    fn test_set_key_config_frame() {
        let frame = encode_set_key_config(1, 2, &sample());
        assert_eq!(frame, vec![0xFF, 0x02, 0x00, 1, 2, 2, 30, 5, 10, 12]);
    }

    #[test]
    fn test_decode_key_config() {
        let resp = fake_response(&[2, 30, 5, 10, 12]);
        assert_eq!(decode_key_config(&resp).unwrap(), sample());
    }

    #[test]
    fn test_decode_key_config_exact_length() {
        let resp = [0, 0, 0, 0, 0, 255, 0, 128, 1, 254];
        let cfg = decode_key_config(&resp).unwrap();
        assert_eq!(cfg.mode, 255);
        assert_eq!(cfg.actuation_point, 0);
        assert_eq!(cfg.deadzone, 128);
        assert_eq!(cfg.up_sensitivity, 1);
        assert_eq!(cfg.down_sensitivity, 254);
    }

    #[test]
    fn test_decode_key_config_short_response() {
        match decode_key_config(&[0xFF, 0x01, 0x00, 0, 0, 2, 30, 5, 10]) {
            Err(ProtocolError::ShortResponse { expected, got }) => {
                assert_eq!(expected, 10);
                assert_eq!(got, 9);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(decode_key_config(&[]).is_err());
    }

    #[test]
    fn test_set_frame_payload_decodes_back() {
        // Bytes 5..10 of the set frame sit at the same offsets as a get reply
        let frame = encode_set_key_config(7, 9, &sample());
        assert_eq!(decode_key_config(&frame).unwrap(), sample());
    }

    #[test]
    fn test_lut_get_frame() {
        assert_eq!(encode_get_lut_config(2), vec![0xFF, 0x03, 0x00, 2]);
    }

    #[test]
    fn test_lut_set_frame_fits_report() {
        let cfg = LutChannelConfig {
            parameter_a: 1.5,
            parameter_b: -0.25,
            parameter_c: 0.0,
            parameter_d: 100.0,
            max_input: 1000.0,
            max_output: 255.0,
        };
        let frame = encode_set_lut_config(1, &cfg);
        assert_eq!(frame.len(), 28);
        assert!(frame.len() <= MESSAGE_SIZE);
        assert_eq!(&frame[..4], &[0xFF, 0x04, 0x00, 1]);
        assert_eq!(&frame[4..8], &1.5f32.to_le_bytes());
        assert_eq!(&frame[8..12], &(-0.25f32).to_le_bytes());
    }

    #[test]
    fn test_decode_lut_config() {
        let mut payload = Vec::new();
        for v in [0.5f32, 1.0, -2.0, 4.0, 800.0, 255.0] {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        let cfg = decode_lut_config(&fake_response(&payload)).unwrap();
        assert_eq!(cfg.parameter_a, 0.5);
        assert_eq!(cfg.parameter_c, -2.0);
        assert_eq!(cfg.max_input, 800.0);
        assert_eq!(cfg.max_output, 255.0);
    }

    #[test]
    fn test_decode_lut_config_short_response() {
        assert!(matches!(
            decode_lut_config(&[0u8; 28]),
            Err(ProtocolError::ShortResponse {
                expected: 29,
                got: 28
            })
        ));
    }
}

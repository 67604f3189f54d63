//! Protocol constants and framing for the Vial analog configuration channel

use crate::error::TransportError;

/// Top-level command byte meaning "vendor/custom channel"
pub const CUSTOM_COMMAND: u8 = 0xFF;

/// Channel byte for the analog configuration channel
pub const CUSTOM_CHANNEL: u8 = 0x00;

/// Length of `[command, sub_command, channel]`
pub const HEADER_LEN: usize = 3;

/// Responses carry up to 5 header/echo bytes; payload starts here
pub const RESPONSE_PAYLOAD_OFFSET: usize = 5;

/// Sub-commands multiplexed under `CUSTOM_COMMAND`
pub mod sub_cmd {
    /// Read one key's analog config: payload row, col
    pub const GET_KEY_CONFIG: u8 = 0x01;
    /// Write one key's analog config: row, col + 5 config bytes
    pub const SET_KEY_CONFIG: u8 = 0x02;
    /// Read a LUT channel's curve parameters
    pub const GET_LUT_CONFIG: u8 = 0x03;
    /// Write a LUT channel's curve parameters
    pub const SET_LUT_CONFIG: u8 = 0x04;

    /// Get human-readable name for a sub-command byte
    pub fn name(sub_cmd: u8) -> &'static str {
        match sub_cmd {
            GET_KEY_CONFIG => "GET_KEY_CONFIG",
            SET_KEY_CONFIG => "SET_KEY_CONFIG",
            GET_LUT_CONFIG => "GET_LUT_CONFIG",
            SET_LUT_CONFIG => "SET_LUT_CONFIG",
            _ => "UNKNOWN",
        }
    }
}

/// Raw HID message size (both directions, without report ID)
pub const MESSAGE_SIZE: usize = 32;

/// Output report size: report ID + message
pub const REPORT_SIZE: usize = MESSAGE_SIZE + 1;

/// HID communication timing constants
pub mod timing {
    /// Retry budget handed to the transport for every request
    pub const DEFAULT_RETRIES: u32 = 20;
    /// Per-attempt read timeout (ms)
    pub const DEFAULT_READ_TIMEOUT_MS: i32 = 500;
    /// Pause between failed attempts (ms)
    pub const RETRY_DELAY_MS: u64 = 10;
}

/// Build a request frame: `[0xFF, sub_cmd, 0x00, payload...]`
pub fn build_frame(sub_cmd: u8, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.push(CUSTOM_COMMAND);
    frame.push(sub_cmd);
    frame.push(CUSTOM_CHANNEL);
    frame.extend_from_slice(payload);
    frame
}

/// Wrap a frame into a zero-padded output report with report ID 0
pub fn build_report(frame: &[u8]) -> Result<Vec<u8>, TransportError> {
    if frame.len() > MESSAGE_SIZE {
        return Err(TransportError::FrameTooLong {
            len: frame.len(),
            max: MESSAGE_SIZE,
        });
    }
    let mut buf = vec![0u8; REPORT_SIZE];
    buf[0] = 0; // Report ID
    buf[1..1 + frame.len()].copy_from_slice(frame);
    Ok(buf)
}

/// Short description of a frame for log lines, e.g. `GET_KEY_CONFIG [FF, 01, 00, 01, 02]`
pub fn describe_frame(frame: &[u8]) -> String {
    let name = match frame {
        [CUSTOM_COMMAND, sub, ..] => sub_cmd::name(*sub),
        _ => "RAW",
    };
    format!("{name} {frame:02X?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_frame_header() {
        let frame = build_frame(sub_cmd::GET_KEY_CONFIG, &[3, 4]);
        assert_eq!(frame, vec![0xFF, 0x01, 0x00, 3, 4]);
    }

    #[test]
    fn test_build_report_pads_and_prefixes_report_id() {
        let report = build_report(&[0xFF, 0x01, 0x00, 1, 2]).unwrap();
        assert_eq!(report.len(), REPORT_SIZE);
        assert_eq!(report[0], 0);
        assert_eq!(&report[1..6], &[0xFF, 0x01, 0x00, 1, 2]);
        assert!(report[6..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_build_report_rejects_oversized_frame() {
        let frame = vec![0u8; MESSAGE_SIZE + 1];
        match build_report(&frame) {
            Err(TransportError::FrameTooLong { len, max }) => {
                assert_eq!(len, MESSAGE_SIZE + 1);
                assert_eq!(max, MESSAGE_SIZE);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_describe_frame() {
        assert_eq!(
            describe_frame(&[0xFF, 0x02, 0x00]),
            "SET_KEY_CONFIG [FF, 02, 00]"
        );
        assert_eq!(describe_frame(&[0x01]), "RAW [01]");
    }
}

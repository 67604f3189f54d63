//! Transport and protocol error types

use thiserror::Error;

/// Errors that can occur while exchanging reports with a device
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Communication timeout")]
    Timeout,

    #[error("No response after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("Frame of {len} bytes exceeds the {max}-byte report")]
    FrameTooLong { len: usize, max: usize },

    // HID-specific errors
    #[error("HID error: {0}")]
    HidError(String),

    #[error("HID permission denied: {0}")]
    HidPermissionDenied(String),
}

impl From<hidapi::HidError> for TransportError {
    fn from(e: hidapi::HidError) -> Self {
        let msg = e.to_string();
        if msg.contains("Permission denied") || msg.contains("EPERM") {
            TransportError::HidPermissionDenied(msg)
        } else {
            TransportError::HidError(msg)
        }
    }
}

/// Errors from encoding a command or decoding its response
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The response is shorter than the sub-command requires
    #[error("Response too short: expected {expected} bytes, got {got}")]
    ShortResponse { expected: usize, got: usize },

    /// The transport spent its whole retry budget without a reply
    #[error("Transport gave up after {attempts} attempts")]
    TransportExhausted { attempts: u32 },

    /// Any other transport failure (open, permission, oversized frame)
    #[error("Transport error: {0}")]
    Transport(TransportError),
}

impl From<TransportError> for ProtocolError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::RetriesExhausted { attempts } => {
                ProtocolError::TransportExhausted { attempts }
            }
            other => ProtocolError::Transport(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_retries_map_to_protocol_error() {
        let err: ProtocolError = TransportError::RetriesExhausted { attempts: 20 }.into();
        assert!(matches!(
            err,
            ProtocolError::TransportExhausted { attempts: 20 }
        ));
    }

    #[test]
    fn test_other_transport_errors_are_wrapped() {
        let err: ProtocolError = TransportError::Timeout.into();
        assert!(matches!(
            err,
            ProtocolError::Transport(TransportError::Timeout)
        ));
        assert_eq!(err.to_string(), "Transport error: Communication timeout");
    }
}

//! Keyboard interface error types

use thiserror::Error;
use vial_he_transport::ProtocolError;

/// Errors from keyboard operations
#[derive(Error, Debug)]
pub enum KeyboardError {
    /// Encoding, decoding or transport failure
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Invalid parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Feature not supported by this device (or not enabled)
    #[error("Feature not supported: {0}")]
    NotSupported(String),
}

//! Transport layer for Vial Hall Effect keyboard configuration
//!
//! This crate provides:
//!
//! - the command codec for the analog configuration channel
//!   (`[0xFF, sub_cmd, 0x00, payload]` frames, see [`command`])
//! - the synchronous [`Transport`] trait the keyboard layer talks to
//! - [`HidRawTransport`], a raw-HID implementation opened by device path

pub mod command;
pub mod error;
pub mod protocol;
pub mod types;

mod hid_raw;

pub use command::{
    decode_key_config, decode_lut_config, encode_get_key_config, encode_get_lut_config,
    encode_set_key_config, encode_set_lut_config, AnalogConfig, HidCommand, HidResponse,
    LutChannelConfig,
};
pub use error::{ProtocolError, TransportError};
pub use hid_raw::HidRawTransport;
pub use types::TransportDeviceInfo;

use std::sync::Arc;

/// The core transport trait - all backends implement this
///
/// A call blocks until a reply arrives or the retry budget is spent, so at
/// most one request is ever in flight per transport.
pub trait Transport: Send + Sync {
    /// Send a frame and return the device's reply
    ///
    /// # Arguments
    /// * `frame` - Complete request frame (header + payload, no report ID)
    /// * `retries` - Number of attempts before giving up
    ///
    /// # Returns
    /// The raw reply buffer; callers decode it and never retry on their own
    fn send(&self, frame: &[u8], retries: u32) -> Result<Vec<u8>, TransportError>;

    /// Get device information
    fn device_info(&self) -> &TransportDeviceInfo;
}

/// Type alias for a shared transport
pub type BoxedTransport = Arc<dyn Transport>;

/// Typed command helpers on top of any [`Transport`]
pub trait TransportExt {
    /// Send a command and ignore the reply contents
    fn execute<C: HidCommand>(&self, cmd: &C, retries: u32) -> Result<(), ProtocolError>;

    /// Send a command and parse its reply
    fn query<C: HidCommand, R: HidResponse>(
        &self,
        cmd: &C,
        retries: u32,
    ) -> Result<R, ProtocolError>;
}

impl<T: Transport + ?Sized> TransportExt for T {
    fn execute<C: HidCommand>(&self, cmd: &C, retries: u32) -> Result<(), ProtocolError> {
        self.send(&cmd.build(), retries)?;
        Ok(())
    }

    fn query<C: HidCommand, R: HidResponse>(
        &self,
        cmd: &C,
        retries: u32,
    ) -> Result<R, ProtocolError> {
        let resp = self.send(&cmd.build(), retries)?;
        R::parse(&resp)
    }
}

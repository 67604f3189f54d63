//! Raw HID transport for Vial keyboards
//!
//! Requests go out as 33-byte output reports (report ID 0 + 32-byte message)
//! and replies come back as 32-byte input reports on the same interface.

use std::ffi::CString;
use std::time::Duration;

use hidapi::{HidApi, HidDevice};
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::TransportError;
use crate::protocol::{self, timing, MESSAGE_SIZE};
use crate::types::TransportDeviceInfo;
use crate::Transport;

/// HID transport over the raw-HID (usage page 0xFF60) interface
pub struct HidRawTransport {
    /// Serializes request/response cycles
    device: Mutex<HidDevice>,
    /// Device information
    info: TransportDeviceInfo,
    /// Per-attempt read timeout (ms)
    read_timeout_ms: i32,
    /// Pause between failed attempts
    retry_delay: Duration,
}

impl HidRawTransport {
    /// Wrap an already opened HID device
    pub fn new(device: HidDevice, info: TransportDeviceInfo) -> Self {
        Self {
            device: Mutex::new(device),
            info,
            read_timeout_ms: timing::DEFAULT_READ_TIMEOUT_MS,
            retry_delay: Duration::from_millis(timing::RETRY_DELAY_MS),
        }
    }

    /// Open the device at an explicit hidapi path
    pub fn open_path(api: &HidApi, path: &str) -> Result<Self, TransportError> {
        let c_path = CString::new(path)
            .map_err(|_| TransportError::DeviceNotFound(format!("invalid path: {path:?}")))?;
        let device = api.open_path(&c_path)?;

        let mut info = TransportDeviceInfo {
            device_path: path.to_string(),
            serial: device.get_serial_number_string().ok().flatten(),
            product_name: device.get_product_string().ok().flatten(),
            ..Default::default()
        };
        if let Ok(dev_info) = device.get_device_info() {
            info.vid = dev_info.vendor_id();
            info.pid = dev_info.product_id();
        }

        debug!("Opened {}", info.display_name());
        Ok(Self::new(device, info))
    }

    /// Set per-attempt read timeout (default 500ms)
    pub fn set_read_timeout(&mut self, ms: i32) {
        self.read_timeout_ms = ms;
    }

    /// One write + read cycle
    fn exchange(&self, report: &[u8]) -> Result<Vec<u8>, TransportError> {
        let device = self.device.lock();
        device.write(report)?;

        let mut buf = vec![0u8; MESSAGE_SIZE];
        let n = device.read_timeout(&mut buf, self.read_timeout_ms)?;
        if n == 0 {
            return Err(TransportError::Timeout);
        }
        Ok(buf)
    }
}

impl Transport for HidRawTransport {
    fn send(&self, frame: &[u8], retries: u32) -> Result<Vec<u8>, TransportError> {
        let report = protocol::build_report(frame)?;
        let attempts = retries.max(1);
        debug!("Sending {}", protocol::describe_frame(frame));

        for attempt in 1..=attempts {
            match self.exchange(&report) {
                Ok(resp) => {
                    trace!("Got response: {:02X?}", resp);
                    return Ok(resp);
                }
                Err(e) => {
                    debug!("Attempt {}/{} failed: {}", attempt, attempts, e);
                    if attempt < attempts {
                        std::thread::sleep(self.retry_delay);
                    }
                }
            }
        }

        Err(TransportError::RetriesExhausted { attempts })
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }
}

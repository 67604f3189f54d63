//! Common types for transport layer

use serde::Serialize;

/// Device identification information
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransportDeviceInfo {
    /// USB Vendor ID
    pub vid: u16,
    /// USB Product ID
    pub pid: u16,
    /// hidapi device path
    pub device_path: String,
    /// Serial number if available (Vial boards report `vial:<uid>`)
    pub serial: Option<String>,
    /// Product name if available
    pub product_name: Option<String>,
}

impl TransportDeviceInfo {
    /// Whether the serial number carries the Vial marker
    pub fn is_vial(&self) -> bool {
        self.serial
            .as_deref()
            .is_some_and(|s| s.contains("vial:"))
    }

    /// Label for log lines and CLI output
    pub fn display_name(&self) -> String {
        match &self.product_name {
            Some(name) => format!("{name} ({:04X}:{:04X})", self.vid, self.pid),
            None => format!("{:04X}:{:04X} at {}", self.vid, self.pid, self.device_path),
        }
    }
}

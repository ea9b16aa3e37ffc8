//! Connectivity provider boundaries.
//!
//! The core delegates WiFi provisioning, nearby-device discovery, and
//! display rendering to the host. These traits describe only the calls the
//! core makes; how a provider fulfils them (captive portal, Bluetooth
//! Classic scan, pixel framebuffer) is the host's business.

use std::time::Duration;

/// WiFi captive-portal provisioning, in the shape of the reference stack's
/// auto-connect flow.
pub trait WifiProvisioner {
    /// Bring up the network, opening a provisioning portal under `ap_name`
    /// if no stored credentials work. Returns whether a link came up.
    fn auto_connect(&mut self, ap_name: &str, passphrase: &str) -> bool;

    /// Forget stored credentials so the next connect starts clean.
    fn reset_settings(&mut self);

    fn is_connected(&self) -> bool;
}

/// Nearby-device discovery scan.
pub trait DeviceDiscovery {
    /// Scan for up to `timeout`. `None` means the scan itself failed, as
    /// opposed to succeeding with zero results.
    fn discover(&mut self, timeout: Duration) -> Option<Vec<String>>;
}

/// Small text display.
pub trait DisplayPanel {
    fn clear(&mut self);

    fn draw_text(&mut self, x: i32, y: i32, text: &str);

    /// Push the drawn frame to the panel.
    fn present(&mut self);
}

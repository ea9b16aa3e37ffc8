//! Device orchestration: the setup/run cycle around the client.
//!
//! # Design
//! `Device` bundles the connectivity providers and the chat client into one
//! explicit context owned by the host's main loop. `setup` runs once at
//! boot (announce pairing, run the discovery scan); `run_once` performs one
//! network-and-request cycle and returns, leaving retry cadence to the host.
//! A WiFi provisioning failure is fatal: stored settings are wiped and the
//! host is expected to restart the device.

use crate::client::ChatClient;
use crate::connector::Connector;
use crate::error::ClientError;
use crate::providers::{DeviceDiscovery, DisplayPanel, WifiProvisioner};
use crate::sink::DisplaySink;
use crate::types::ChatRequest;

const PROVISIONING_AP: &str = "AutoConnectAP";
const PROVISIONING_PASSPHRASE: &str = "password";

/// Vertical pixels per text row on the reference panel's default font.
const LINE_HEIGHT: i32 = 10;

/// Fatal device-level failures. The host restarts the device on these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// The provisioning flow could not bring a network link up.
    WifiProvisioning,
}

/// Outcome of one `run_once` cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Response body received and rendered.
    Completed(Vec<u8>),

    /// The request failed; the host loop decides when to try again.
    Failed(ClientError),
}

/// The application context: providers plus the chat client.
pub struct Device<W, B, D, C>
where
    W: WifiProvisioner,
    B: DeviceDiscovery,
    D: DisplayPanel,
    C: Connector,
{
    wifi: W,
    discovery: B,
    display: D,
    client: ChatClient<C>,
}

impl<W, B, D, C> Device<W, B, D, C>
where
    W: WifiProvisioner,
    B: DeviceDiscovery,
    D: DisplayPanel,
    C: Connector,
{
    pub fn new(wifi: W, discovery: B, display: D, client: ChatClient<C>) -> Self {
        Self {
            wifi,
            discovery,
            display,
            client,
        }
    }

    /// Boot-time setup: announce pairing and run the discovery scan.
    /// Returns the discovered device names, or `None` if the scan failed.
    pub fn setup(&mut self) -> Option<Vec<String>> {
        self.display.clear();
        self.display.draw_text(0, 0, "Bluetooth is now pairable!");
        self.display.present();

        let timeout = self.client.config().discovery_timeout;
        let found = self.discovery.discover(timeout);
        if found.is_none() {
            tracing::warn!("discovery scan failed, no result");
        }
        found
    }

    /// Bring the network up if it is down. Fatal on provisioning failure.
    pub fn ensure_wifi(&mut self) -> Result<(), DeviceError> {
        if self.wifi.is_connected() {
            return Ok(());
        }
        tracing::info!("WiFi disconnected, reconnecting");
        if !self.wifi.auto_connect(PROVISIONING_AP, PROVISIONING_PASSPHRASE)
            || !self.wifi.is_connected()
        {
            self.wifi.reset_settings();
            self.display.clear();
            self.display.draw_text(0, 0, "WiFi Failed!");
            self.display.present();
            return Err(DeviceError::WifiProvisioning);
        }
        self.display.clear();
        self.display.draw_text(0, 0, "WiFi OK!");
        self.display.present();
        Ok(())
    }

    /// One full cycle: ensure the network, send the prompt, render the
    /// streamed response. Request failures are non-fatal and returned as
    /// `CycleOutcome::Failed`.
    pub fn run_once(&mut self, prompt: &ChatRequest) -> Result<CycleOutcome, DeviceError> {
        self.ensure_wifi()?;
        let mut sink = DisplaySink::new(&mut self.display, LINE_HEIGHT);
        match self.client.send_chat(prompt, &mut sink) {
            Ok(body) => Ok(CycleOutcome::Completed(body)),
            Err(e) => Ok(CycleOutcome::Failed(e)),
        }
    }
}

//! Client and device configuration.
//!
//! Defaults match the reference deployment: the hosted chat endpoint on 443,
//! a 10 second discovery window, a 5 second first-byte deadline, and a 10 ms
//! poll interval. Hosts can deserialize the struct from whatever config
//! source they carry; every field falls back to its default when omitted.

use std::time::Duration;

use serde::Deserialize;

const DEFAULT_HOST: &str = "ai.hackclub.com";
const DEFAULT_PORT: u16 = 443;
const DEFAULT_DISCOVERY_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_POLL_INTERVAL_MS: u64 = 10;

/// Recognized options for one chat client instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// DNS name of the chat endpoint.
    pub host: String,

    /// TCP port of the chat endpoint.
    pub port: u16,

    /// How long the device discovery provider may scan.
    #[serde(rename = "discovery_timeout_ms", with = "millis")]
    pub discovery_timeout: Duration,

    /// Deadline for the first response byte after the request is sent.
    #[serde(rename = "response_timeout_ms", with = "millis")]
    pub response_timeout: Duration,

    /// Sleep between availability polls while waiting on the transport.
    #[serde(rename = "poll_interval_ms", with = "millis")]
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            discovery_timeout: Duration::from_millis(DEFAULT_DISCOVERY_TIMEOUT_MS),
            response_timeout: Duration::from_millis(DEFAULT_RESPONSE_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// Serde adapter: durations are written as whole milliseconds on the wire.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}

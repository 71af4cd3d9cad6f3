//! Boundary configuration for one device.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default device label.
pub const DEFAULT_NAME: &str = "Gunter";

/// Default poll interval in seconds.
pub const DEFAULT_SCAN_INTERVAL: u64 = 30;

/// Minimum poll interval in seconds. Values below this are clamped.
pub const MIN_SCAN_INTERVAL: u64 = 1;

/// Configuration for polling one device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Host (or host:port) of the device's embedded web server.
    pub host: String,
    /// Human-readable device label, used as the entity id prefix.
    #[serde(default = "default_name")]
    pub name: String,
    /// Poll interval in seconds.
    #[serde(default = "default_scan_interval")]
    pub scan_interval: u64,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_scan_interval() -> u64 {
    DEFAULT_SCAN_INTERVAL
}

impl DeviceConfig {
    /// Create a config for `host` with default name and interval.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            name: default_name(),
            scan_interval: DEFAULT_SCAN_INTERVAL,
        }
    }

    /// Set the device label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the poll interval in seconds.
    pub fn with_scan_interval(mut self, seconds: u64) -> Self {
        self.scan_interval = seconds;
        self
    }

    /// Effective poll interval, clamped to the minimum.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval.max(MIN_SCAN_INTERVAL))
    }
}

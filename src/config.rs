// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device configuration types.

use std::time::Duration;

use crate::event::DeviceInfo;

/// Identity and connection settings for a single light.
///
/// Immutable after construction; supplied by the host configuration.
///
/// # Examples
///
/// ```
/// use novalight::config::DeviceConfig;
///
/// let config = DeviceConfig::new("bf31c9...", "192.168.1.73", "a1b2c3d4e5f6a7b8")
///     .with_name("Living Room Floodlight")
///     .with_version("3.3");
/// ```
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Friendly device name, used in logs and outbound messages.
    pub name: String,
    /// Network address of the device.
    pub ip: String,
    /// Device identifier as registered with the vendor cloud.
    pub id: String,
    /// Pre-shared local key.
    pub key: String,
    /// Protocol version spoken by the device.
    pub version: String,
    /// Reconnection policy.
    pub reconnect: ReconnectPolicy,
}

impl DeviceConfig {
    /// Creates a configuration for a device.
    #[must_use]
    pub fn new(id: impl Into<String>, ip: impl Into<String>, key: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            ip: ip.into(),
            id,
            key: key.into(),
            version: "3.3".to_string(),
            reconnect: ReconnectPolicy::default(),
        }
    }

    /// Sets a friendly name for the device.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the protocol version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the reconnection policy.
    #[must_use]
    pub fn with_reconnect(mut self, policy: ReconnectPolicy) -> Self {
        self.reconnect = policy;
        self
    }

    /// Builds the outbound device-info block with the given availability.
    #[must_use]
    pub fn device_info(&self, available: bool) -> DeviceInfo {
        DeviceInfo {
            name: self.name.clone(),
            ip: self.ip.clone(),
            id: self.id.clone(),
            available,
        }
    }
}

/// Configuration for automatic reconnection.
///
/// The retry uses a fixed backoff: one timer at a time, re-armed only by a
/// fresh disconnect.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use novalight::config::ReconnectPolicy;
///
/// let policy = ReconnectPolicy::default();
/// assert!(policy.enabled);
///
/// let policy = ReconnectPolicy::disabled();
/// let policy = ReconnectPolicy::default().with_retry_delay(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Whether automatic reconnection is enabled.
    pub enabled: bool,
    /// Delay between a disconnect and the retry it schedules.
    pub retry_delay: Duration,
    /// Timeout for the device-discovery step of a connect attempt.
    pub discovery_timeout: Duration,
}

impl ReconnectPolicy {
    /// Creates a disabled reconnection policy.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Sets the retry delay.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Sets the discovery timeout.
    #[must_use]
    pub fn with_discovery_timeout(mut self, timeout: Duration) -> Self {
        self.discovery_timeout = timeout;
        self
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            retry_delay: Duration::from_secs(10),
            discovery_timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = DeviceConfig::new("dev-id", "192.168.1.73", "secret");

        assert_eq!(config.name, "dev-id");
        assert_eq!(config.version, "3.3");
        assert!(config.reconnect.enabled);
    }

    #[test]
    fn config_with_options() {
        let config = DeviceConfig::new("dev-id", "192.168.1.73", "secret")
            .with_name("Floodlight")
            .with_version("3.4")
            .with_reconnect(ReconnectPolicy::disabled());

        assert_eq!(config.name, "Floodlight");
        assert_eq!(config.version, "3.4");
        assert!(!config.reconnect.enabled);
    }

    #[test]
    fn device_info_projection() {
        let config = DeviceConfig::new("dev-id", "192.168.1.73", "secret").with_name("Floodlight");
        let info = config.device_info(true);

        assert_eq!(info.name, "Floodlight");
        assert_eq!(info.ip, "192.168.1.73");
        assert_eq!(info.id, "dev-id");
        assert!(info.available);
    }

    #[test]
    fn reconnect_policy_default() {
        let policy = ReconnectPolicy::default();

        assert!(policy.enabled);
        assert_eq!(policy.retry_delay, Duration::from_secs(10));
        assert_eq!(policy.discovery_timeout, Duration::from_secs(10));
    }

    #[test]
    fn reconnect_policy_disabled() {
        assert!(!ReconnectPolicy::disabled().enabled);
    }
}

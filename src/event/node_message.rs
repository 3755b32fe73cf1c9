// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound message shapes.

use serde::Serialize;
use serde_json::Value;

use crate::state::LightState;

/// Identity block carried by every outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// Friendly device name.
    pub name: String,
    /// Network address.
    pub ip: String,
    /// Device identifier.
    pub id: String,
    /// Whether the device is currently reachable.
    pub available: bool,
}

/// A message emitted by the bridge.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum NodeMessage {
    /// Connectivity changed; carries only the device-info block.
    Availability {
        /// The device this message is about.
        #[serde(rename = "deviceInfo")]
        device_info: DeviceInfo,
    },

    /// The device reported data.
    StateUpdate {
        /// The device this message is about.
        #[serde(rename = "deviceInfo")]
        device_info: DeviceInfo,
        /// The protocol command code the data arrived under, if any.
        #[serde(rename = "commandCode")]
        command_code: Option<u64>,
        /// The raw payload as received from the device.
        #[serde(rename = "rawDataPoints")]
        raw_data_points: Value,
        /// Message topic, always `"update"`.
        topic: String,
        /// Snapshot of the canonical light state after the update.
        payload: LightState,
    },
}

impl NodeMessage {
    /// Creates an availability message.
    #[must_use]
    pub fn availability(device_info: DeviceInfo) -> Self {
        Self::Availability { device_info }
    }

    /// Creates a state-update message.
    #[must_use]
    pub fn state_update(
        device_info: DeviceInfo,
        command_code: Option<u64>,
        raw_data_points: Value,
        payload: LightState,
    ) -> Self {
        Self::StateUpdate {
            device_info,
            command_code,
            raw_data_points,
            topic: "update".to_string(),
            payload,
        }
    }

    /// Returns the device-info block of this message.
    #[must_use]
    pub fn device_info(&self) -> &DeviceInfo {
        match self {
            Self::Availability { device_info } | Self::StateUpdate { device_info, .. } => {
                device_info
            }
        }
    }

    /// Returns `true` if this is a state-update message.
    #[must_use]
    pub fn is_state_update(&self) -> bool {
        matches!(self, Self::StateUpdate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info(available: bool) -> DeviceInfo {
        DeviceInfo {
            name: "Floodlight".to_string(),
            ip: "192.168.1.73".to_string(),
            id: "dev-id".to_string(),
            available,
        }
    }

    #[test]
    fn availability_serialization() {
        let msg = NodeMessage::availability(info(false));
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["deviceInfo"]["name"], json!("Floodlight"));
        assert_eq!(json["deviceInfo"]["available"], json!(false));
        assert!(json.get("topic").is_none());
    }

    #[test]
    fn state_update_serialization() {
        let raw = json!({"dps": {"20": true}});
        let msg = NodeMessage::state_update(info(true), Some(10), raw, LightState::new());
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["topic"], json!("update"));
        assert_eq!(json["commandCode"], json!(10));
        assert_eq!(json["rawDataPoints"]["dps"]["20"], json!(true));
        assert_eq!(json["payload"]["mode"], json!("n/a"));
    }

    #[test]
    fn device_info_accessor() {
        let msg = NodeMessage::availability(info(true));
        assert!(msg.device_info().available);
        assert!(!msg.is_state_update());
    }
}

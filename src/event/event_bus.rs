// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast bus for outbound node messages.

use tokio::sync::broadcast;

use super::NodeMessage;

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Broadcast bus carrying [`NodeMessage`]s to any number of subscribers.
///
/// A slow subscriber may lose old messages (`RecvError::Lagged`); publishing
/// with no subscribers at all silently discards the message.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<NodeMessage>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to node messages published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<NodeMessage> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes a message to all subscribers.
    pub fn publish(&self, message: NodeMessage) {
        // Ignore errors (no subscribers)
        let _ = self.sender.send(message);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DeviceInfo;

    fn message() -> NodeMessage {
        NodeMessage::availability(DeviceInfo {
            name: "light".to_string(),
            ip: "10.0.0.2".to_string(),
            id: "dev".to_string(),
            available: false,
        })
    }

    #[test]
    fn new_bus_has_no_subscribers() {
        assert_eq!(EventBus::new().subscriber_count(), 0);
    }

    #[tokio::test]
    async fn publish_delivers_to_subscribers() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(message());

        assert!(!rx1.recv().await.unwrap().device_info().available);
        assert!(!rx2.recv().await.unwrap().device_info().available);
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        EventBus::new().publish(message());
    }

    #[test]
    fn clone_shares_the_channel() {
        let bus = EventBus::new();
        let other = bus.clone();
        let _rx = bus.subscribe();

        assert_eq!(other.subscriber_count(), 1);
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The event bridge.
//!
//! [`LightBridge`] is the composition root for one device: it owns the
//! [`ConnectionManager`], the [`CommandRouter`] and the [`LightState`],
//! consumes transport events and inbound commands, and publishes outbound
//! [`NodeMessage`]s. Everything runs on a single task, so no state is shared
//! and no locking exists anywhere on the device's timeline.

use serde_json::Value;
use tokio::sync::{broadcast, mpsc, watch};

use crate::command::{CommandRouter, Operation, SymbolicCommand};
use crate::config::DeviceConfig;
use crate::event::{EventBus, NodeMessage};
use crate::manager::{ConnectionManager, ConnectionState};
use crate::state::LightState;
use crate::transport::{Transport, TransportEvent};

/// Capacity of the inbound command channel.
const INPUT_CHANNEL_CAPACITY: usize = 16;

/// Inputs accepted by the bridge.
#[derive(Debug)]
pub enum BridgeInput {
    /// A symbolic command to route to the device.
    Command(SymbolicCommand),
    /// Tear the bridge down.
    ///
    /// `removed` distinguishes node removal from a redeploy; both disconnect
    /// gracefully without arming a reconnect timer.
    Close {
        /// Whether the hosting node is being removed for good.
        removed: bool,
    },
}

/// Handle for interacting with a running [`LightBridge`].
#[derive(Debug, Clone)]
pub struct BridgeHandle {
    input_tx: mpsc::Sender<BridgeInput>,
    bus: EventBus,
    state_rx: watch::Receiver<LightState>,
    connection_rx: watch::Receiver<ConnectionState>,
}

impl BridgeHandle {
    /// Sends a symbolic command to the bridge.
    ///
    /// Returns `false` if the bridge has already shut down.
    pub async fn send_command(&self, command: SymbolicCommand) -> bool {
        self.input_tx
            .send(BridgeInput::Command(command))
            .await
            .is_ok()
    }

    /// Asks the bridge to shut down.
    ///
    /// Returns `false` if the bridge has already shut down.
    pub async fn close(&self, removed: bool) -> bool {
        self.input_tx
            .send(BridgeInput::Close { removed })
            .await
            .is_ok()
    }

    /// Subscribes to outbound node messages.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<NodeMessage> {
        self.bus.subscribe()
    }

    /// Returns a watch receiver for the canonical light state.
    #[must_use]
    pub fn light_state(&self) -> watch::Receiver<LightState> {
        self.state_rx.clone()
    }

    /// Returns a watch receiver for the connection state, for status
    /// rendering by the host.
    #[must_use]
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.connection_rx.clone()
    }
}

/// Drives one device: transport events in, node messages out.
///
/// # Examples
///
/// ```no_run
/// use novalight::bridge::LightBridge;
/// use novalight::command::SymbolicCommand;
/// use novalight::config::DeviceConfig;
/// use serde_json::json;
///
/// # async fn example<T: novalight::transport::Transport>(
/// #     transport: T,
/// #     events: tokio::sync::mpsc::Receiver<novalight::transport::TransportEvent>,
/// # ) {
/// let config = DeviceConfig::new("bf31c9...", "192.168.1.73", "a1b2c3d4e5f6a7b8")
///     .with_name("Living Room Floodlight");
///
/// let (bridge, handle) = LightBridge::new(config, transport, events);
/// tokio::spawn(bridge.run());
///
/// handle
///     .send_command(SymbolicCommand::new("light/WHITE", json!({"brightness": 80})))
///     .await;
/// # }
/// ```
pub struct LightBridge<T: Transport> {
    config: DeviceConfig,
    manager: ConnectionManager<T>,
    router: CommandRouter,
    state: LightState,
    available: bool,
    bus: EventBus,
    state_tx: watch::Sender<LightState>,
    connection_tx: watch::Sender<ConnectionState>,
    transport_events: mpsc::Receiver<TransportEvent>,
    inputs: mpsc::Receiver<BridgeInput>,
    due_rx: mpsc::UnboundedReceiver<u64>,
}

impl<T: Transport> LightBridge<T> {
    /// Creates a bridge around a transport and its event stream.
    #[must_use]
    pub fn new(
        config: DeviceConfig,
        transport: T,
        transport_events: mpsc::Receiver<TransportEvent>,
    ) -> (Self, BridgeHandle) {
        let (manager, due_rx) =
            ConnectionManager::new(transport, config.name.clone(), config.reconnect.clone());
        let (input_tx, inputs) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let (state_tx, state_rx) = watch::channel(LightState::new());
        let (connection_tx, connection_rx) = watch::channel(ConnectionState::Disconnected);
        let bus = EventBus::new();

        let handle = BridgeHandle {
            input_tx,
            bus: bus.clone(),
            state_rx,
            connection_rx,
        };

        let bridge = Self {
            config,
            manager,
            router: CommandRouter::new(),
            state: LightState::new(),
            available: false,
            bus,
            state_tx,
            connection_tx,
            transport_events,
            inputs,
            due_rx,
        };

        (bridge, handle)
    }

    /// Runs the bridge until it is closed.
    ///
    /// Issues the deploy-time connect first, then processes transport
    /// events, inbound commands, and reconnect-timer firings on a single
    /// timeline. Transport failures never escape this loop; they are
    /// converted to logged status reports.
    pub async fn run(mut self) {
        // Failures here are not fatal: the disconnect-driven retry takes over.
        let _ = self
            .manager
            .request_connect("deploy connection request")
            .await;
        self.sync_connection_state();

        loop {
            tokio::select! {
                Some(event) = self.transport_events.recv() => {
                    self.handle_transport_event(event);
                    self.sync_connection_state();
                }
                Some(token) = self.due_rx.recv() => {
                    let _ = self.manager.on_reconnect_due(token).await;
                    self.sync_connection_state();
                }
                input = self.inputs.recv() => {
                    match input {
                        Some(BridgeInput::Command(command)) => {
                            self.handle_command(command).await;
                            self.sync_connection_state();
                        }
                        Some(BridgeInput::Close { removed }) => {
                            self.manager.shutdown(removed);
                            self.sync_connection_state();
                            break;
                        }
                        None => {
                            // All handles dropped: treat as a redeploy close.
                            self.manager.shutdown(false);
                            self.sync_connection_state();
                            break;
                        }
                    }
                }
            }
        }
    }

    fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Connected => {
                self.manager.on_connected();
            }
            TransportEvent::Disconnected => {
                self.manager.on_disconnected();
                self.available = false;
                self.bus
                    .publish(NodeMessage::availability(self.config.device_info(false)));
            }
            TransportEvent::Error(error) => {
                self.manager.on_error(&error);
            }
            TransportEvent::Data {
                payload,
                command_code,
            } => {
                self.available = true;
                if let Some(dps) = payload.get("dps").and_then(Value::as_object) {
                    self.state.apply_data_points(dps);
                    let _ = self.state_tx.send(self.state.clone());
                }
                self.bus.publish(NodeMessage::state_update(
                    self.config.device_info(true),
                    command_code,
                    payload,
                    self.state.snapshot(),
                ));
            }
        }
    }

    /// Routes one command and executes the resulting operations.
    ///
    /// A routing failure drops the command with a diagnostic; it never
    /// reaches the transport and never propagates further.
    async fn handle_command(&mut self, command: SymbolicCommand) {
        let operations = match self.router.route(&command) {
            Ok(operations) => operations,
            Err(error) => {
                tracing::error!(
                    device = %self.config.name,
                    topic = %command.topic,
                    %error,
                    "dropping invalid command"
                );
                return;
            }
        };

        for operation in operations {
            self.execute(operation).await;
        }
    }

    async fn execute(&mut self, operation: Operation) {
        match operation {
            Operation::RequestSchema => {
                if let Err(error) = self.manager.request_schema().await {
                    tracing::warn!(device = %self.config.name, %error, "schema request failed");
                }
            }
            Operation::Connect => {
                let _ = self
                    .manager
                    .request_connect("connection requested by input")
                    .await;
            }
            Operation::Disconnect => {
                self.manager.disconnect_transport();
            }
            Operation::Toggle => {
                if let Err(error) = self.manager.toggle().await {
                    tracing::warn!(device = %self.config.name, %error, "toggle failed");
                }
            }
            write_operation => {
                // Only write variants remain here.
                if let Some(request) = write_operation.into_write_request() {
                    match self.manager.write(request).await {
                        Ok(()) => {
                            tracing::info!(
                                device = %self.config.name,
                                "set success at {}",
                                chrono::Local::now().format("%d-%m-%Y %H:%M:%S")
                            );
                        }
                        Err(error) => {
                            tracing::warn!(device = %self.config.name, %error, "set state failed");
                        }
                    }
                }
            }
        }
    }

    fn sync_connection_state(&mut self) {
        let _ = self.connection_tx.send(self.manager.state().clone());
    }
}

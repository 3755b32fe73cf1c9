// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The connection state machine.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::ReconnectPolicy;
use crate::error::TransportError;
use crate::transport::{Transport, WriteRequest};

/// Connection state of the managed device.
///
/// Transitions are the sole responsibility of [`ConnectionManager`]; nothing
/// else mutates this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected.
    Disconnected,
    /// Discovery or connect is in flight.
    Connecting,
    /// The protocol session is established.
    Connected,
    /// The last connect attempt failed.
    Error(String),
}

impl ConnectionState {
    /// Returns `true` if the device is connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Returns `true` if the last connect attempt failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// The one outstanding scheduled retry, if any.
///
/// The token identifies the timer generation: a firing that raced past its
/// cancellation arrives with a stale token and is ignored.
#[derive(Debug)]
struct PendingReconnect {
    token: u64,
    handle: JoinHandle<()>,
}

/// Owns the transport and runs the reconnection cycle for one device.
///
/// All calls happen on the owning task's timeline; suspension occurs only at
/// transport call boundaries. The reconnect timer is a spawned task that
/// sleeps and then sends its token back to the owner, which feeds it to
/// [`on_reconnect_due`](Self::on_reconnect_due).
///
/// Central invariant: at most one [`PendingReconnect`] exists at any time.
/// Scheduling a new one first cancels the prior one, and cancellation of an
/// absent or already-fired timer is a silent no-op.
#[derive(Debug)]
pub struct ConnectionManager<T: Transport> {
    transport: T,
    device_name: String,
    policy: ReconnectPolicy,
    state: ConnectionState,
    /// Cleared permanently by [`shutdown`](Self::shutdown).
    reconnect_enabled: bool,
    pending: Option<PendingReconnect>,
    next_token: u64,
    due_tx: mpsc::UnboundedSender<u64>,
    last_error: Option<TransportError>,
}

impl<T: Transport> ConnectionManager<T> {
    /// Creates a manager around a transport.
    ///
    /// The returned receiver yields reconnect-timer tokens; the owner loop
    /// must feed each one to [`on_reconnect_due`](Self::on_reconnect_due).
    pub fn new(
        transport: T,
        device_name: impl Into<String>,
        policy: ReconnectPolicy,
    ) -> (Self, mpsc::UnboundedReceiver<u64>) {
        let (due_tx, due_rx) = mpsc::unbounded_channel();
        let reconnect_enabled = policy.enabled;
        let manager = Self {
            transport,
            device_name: device_name.into(),
            policy,
            state: ConnectionState::Disconnected,
            reconnect_enabled,
            pending: None,
            next_token: 0,
            due_tx,
            last_error: None,
        };
        (manager, due_rx)
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Returns `true` if a reconnect timer is armed.
    #[must_use]
    pub fn has_pending_reconnect(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the most recent out-of-band transport error, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&TransportError> {
        self.last_error.as_ref()
    }

    /// Requests a connection: bounded discovery, then connect.
    ///
    /// Only acts from the `Disconnected` and `Error` states; a request while
    /// connecting or connected is ignored. Any armed reconnect timer is
    /// cancelled first, since an explicit request supersedes a scheduled
    /// retry.
    ///
    /// # Errors
    ///
    /// Returns the discovery or connect failure. The state moves to
    /// [`ConnectionState::Error`]; no retry is scheduled here — the retry is
    /// driven by the transport's `disconnected` event, because a connect
    /// failure and a disconnect event can race and must not arm two timers.
    pub async fn request_connect(&mut self, reason: &str) -> Result<(), TransportError> {
        if matches!(
            self.state,
            ConnectionState::Connecting | ConnectionState::Connected
        ) {
            tracing::debug!(device = %self.device_name, "connect request ignored, already {:?}", self.state);
            return Ok(());
        }

        self.cancel_reconnect();
        self.state = ConnectionState::Connecting;
        tracing::info!(device = %self.device_name, %reason, "connecting");

        let timeout = self.policy.discovery_timeout;
        if let Err(e) = self.transport.discover(timeout).await {
            tracing::warn!(device = %self.device_name, error = %e, "discovery failed");
            self.state = ConnectionState::Error(e.to_string());
            return Err(e);
        }

        match self.transport.connect().await {
            Ok(()) => {
                self.state = ConnectionState::Connected;
                self.cancel_reconnect();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(device = %self.device_name, error = %e, "connect failed");
                self.state = ConnectionState::Error(e.to_string());
                Err(e)
            }
        }
    }

    /// Handles the transport's `connected` event.
    ///
    /// Moves to `Connected` from any state and disarms a pending reconnect;
    /// disarming when none is armed is a no-op.
    pub fn on_connected(&mut self) {
        self.state = ConnectionState::Connected;
        self.last_error = None;
        self.cancel_reconnect();
        tracing::info!(device = %self.device_name, "connected");
    }

    /// Handles the transport's `disconnected` event.
    ///
    /// Moves to `Disconnected` and, when reconnection is still enabled, arms
    /// exactly one retry timer at the policy's fixed delay.
    pub fn on_disconnected(&mut self) {
        self.state = ConnectionState::Disconnected;
        tracing::info!(device = %self.device_name, "disconnected");

        if self.reconnect_enabled {
            self.schedule_reconnect();
        }
    }

    /// Handles an out-of-band transport error.
    ///
    /// The connection state is left as is; the reason is recorded and
    /// surfaced through [`last_error`](Self::last_error). A socket-level
    /// failure additionally disarms any pending reconnect, so that the
    /// `disconnected` event that usually follows cannot race a second timer
    /// into existence.
    pub fn on_error(&mut self, error: &TransportError) {
        tracing::warn!(device = %self.device_name, error = %error, "transport error");

        if error.is_socket_failure() {
            tracing::debug!(device = %self.device_name, "socket failure, clearing any reconnect timer");
            self.cancel_reconnect();
        }
        self.last_error = Some(error.clone());
    }

    /// Handles a reconnect-timer firing.
    ///
    /// A token that does not match the armed timer is stale (the timer was
    /// cancelled after the message was already in flight) and is ignored.
    ///
    /// # Errors
    ///
    /// Returns the connect failure when the retry itself fails.
    pub async fn on_reconnect_due(&mut self, token: u64) -> Result<(), TransportError> {
        match &self.pending {
            Some(pending) if pending.token == token => {
                self.pending = None;
            }
            _ => {
                tracing::debug!(device = %self.device_name, token, "ignoring stale reconnect timer");
                return Ok(());
            }
        }

        self.request_connect("scheduled reconnect").await
    }

    /// Disconnects the transport without touching the reconnect policy.
    ///
    /// Used for the inbound `disconnect` command; the `disconnected` event
    /// it provokes will arm the usual retry. The underlying transport call
    /// is skipped when the transport already reports disconnected, since
    /// the transport does not guarantee an idempotent disconnect.
    pub fn disconnect_transport(&mut self) {
        if self.transport.is_connected() {
            tracing::info!(device = %self.device_name, "disconnection requested by input");
            self.transport.disconnect();
        } else {
            tracing::debug!(device = %self.device_name, "disconnect skipped, not connected");
        }
    }

    /// Tears the connection down for node removal or redeploy.
    ///
    /// Disables auto-reconnect in both cases — a redeploy immediately
    /// creates a fresh manager, and a stale timer from this one must not
    /// race it — cancels any pending retry, and disconnects the transport
    /// if it is still up.
    pub fn shutdown(&mut self, permanent: bool) {
        self.reconnect_enabled = false;
        self.cancel_reconnect();

        if self.transport.is_connected() {
            tracing::info!(
                device = %self.device_name,
                permanent,
                "gracefully disconnecting device"
            );
            self.transport.disconnect();
        } else {
            tracing::info!(device = %self.device_name, "device not connected on teardown");
        }
        self.state = ConnectionState::Disconnected;
    }

    /// Asks the device for its full data-point schema.
    ///
    /// # Errors
    ///
    /// Returns the transport failure.
    pub async fn request_schema(&mut self) -> Result<(), TransportError> {
        self.transport.request_schema().await
    }

    /// Writes one or more data points.
    ///
    /// # Errors
    ///
    /// Returns the transport failure.
    pub async fn write(&mut self, request: WriteRequest) -> Result<(), TransportError> {
        self.transport.write(request).await
    }

    /// Toggles the device power.
    ///
    /// # Errors
    ///
    /// Returns the transport failure.
    pub async fn toggle(&mut self) -> Result<(), TransportError> {
        self.transport.toggle().await
    }

    /// Arms the retry timer, replacing any prior one.
    fn schedule_reconnect(&mut self) {
        self.cancel_reconnect();

        self.next_token += 1;
        let token = self.next_token;
        let delay = self.policy.retry_delay;
        let due_tx = self.due_tx.clone();

        tracing::debug!(device = %self.device_name, token, ?delay, "scheduling reconnect");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The owner may have cancelled by the time this lands; the
            // token comparison in on_reconnect_due handles that.
            let _ = due_tx.send(token);
        });

        self.pending = Some(PendingReconnect { token, handle });
    }

    /// Disarms the retry timer. Safe to call any number of times.
    fn cancel_reconnect(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::debug!(device = %self.device_name, token = pending.token, "cancelling reconnect timer");
            pending.handle.abort();
        }
    }
}

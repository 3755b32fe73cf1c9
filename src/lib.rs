// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # novalight
//!
//! Lifecycle management for locally-controlled smart lights.
//!
//! The library sits between a host automation surface and a device
//! transport: it keeps a connection to one light alive, maintains the
//! canonical view of the light's state from data-point reports, routes
//! symbolic commands into protocol operations, and publishes state and
//! availability changes to subscribers.
//!
//! ## Architecture
//!
//! - [`bridge::LightBridge`] is the composition root. One bridge per
//!   device, running on one task; transport events, inbound commands and
//!   reconnect timers all land on the same timeline, so nothing is locked.
//! - [`manager::ConnectionManager`] owns the connect → connected →
//!   disconnected → retry cycle, with at most one reconnect timer armed at
//!   any time.
//! - [`command::CommandRouter`] turns inbound [`command::SymbolicCommand`]s
//!   into validated [`command::Operation`]s.
//! - [`state::LightState`] folds raw data-point updates into the canonical
//!   light state.
//! - [`event::EventBus`] broadcasts [`event::NodeMessage`]s to any number
//!   of subscribers.
//!
//! The transport itself is abstracted behind [`transport::Transport`]; the
//! library ships no protocol implementation and is exercised against
//! scripted transports in its tests.
//!
//! ## Example
//!
//! ```no_run
//! use novalight::bridge::LightBridge;
//! use novalight::command::SymbolicCommand;
//! use novalight::config::DeviceConfig;
//! use serde_json::json;
//!
//! # async fn example<T: novalight::transport::Transport>(
//! #     transport: T,
//! #     events: tokio::sync::mpsc::Receiver<novalight::transport::TransportEvent>,
//! # ) {
//! let config = DeviceConfig::new("bf31c9...", "192.168.1.73", "a1b2c3d4e5f6a7b8")
//!     .with_name("Living Room Floodlight");
//!
//! let (bridge, handle) = LightBridge::new(config, transport, events);
//! let mut updates = handle.subscribe();
//! tokio::spawn(bridge.run());
//!
//! handle
//!     .send_command(SymbolicCommand::new("light/WHITE", json!({"brightness": 80})))
//!     .await;
//!
//! while let Ok(message) = updates.recv().await {
//!     println!("{}", serde_json::to_string(&message).unwrap());
//! }
//! # }
//! ```

pub mod bridge;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod manager;
pub mod state;
pub mod transport;

pub use bridge::{BridgeHandle, BridgeInput, LightBridge};
pub use config::{DeviceConfig, ReconnectPolicy};
pub use error::{Error, Result};
pub use event::{DeviceInfo, EventBus, NodeMessage};
pub use manager::{ConnectionManager, ConnectionState};
pub use state::LightState;

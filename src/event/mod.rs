// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound node messages.
//!
//! The bridge publishes availability and state-update messages on a
//! broadcast [`EventBus`]; any number of subscribers can observe them.
//!
//! # Examples
//!
//! ```
//! use novalight::event::EventBus;
//!
//! let bus = EventBus::new();
//! let _rx = bus.subscribe();
//! ```

mod event_bus;
mod node_message;

pub use event_bus::EventBus;
pub use node_message::{DeviceInfo, NodeMessage};

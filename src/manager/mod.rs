// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection lifecycle management.
//!
//! This module owns the connect → connected → disconnected → retry cycle for
//! one device. The [`ConnectionManager`] holds the transport, the current
//! [`ConnectionState`], and the single optional reconnect timer; it is driven
//! from one task only, so none of its state is shared or locked.

mod connection;

pub use connection::{ConnectionManager, ConnectionState};

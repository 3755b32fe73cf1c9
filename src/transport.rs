// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device transport boundary.
//!
//! The wire protocol (framing, encryption, session handling) lives outside
//! this crate. A protocol client implements [`Transport`] and hands the
//! bridge an event stream; everything above the trait only deals with
//! connect/disconnect/write semantics and [`TransportEvent`]s.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::error::TransportError;

/// A write operation handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteRequest {
    /// Write a single data point.
    Single {
        /// The data-point index.
        index: u8,
        /// The value to write.
        value: Value,
    },
    /// Write several data points in one protocol frame.
    Multiple {
        /// The data points to write, keyed by index.
        data: BTreeMap<u8, Value>,
    },
    /// A raw write forwarded verbatim from the caller.
    Raw(Value),
}

impl WriteRequest {
    /// Creates a single data-point write.
    #[must_use]
    pub fn single(index: u8, value: impl Into<Value>) -> Self {
        Self::Single {
            index,
            value: value.into(),
        }
    }

    /// Creates a multi data-point write.
    #[must_use]
    pub fn multiple(data: BTreeMap<u8, Value>) -> Self {
        Self::Multiple { data }
    }
}

/// Events emitted by a transport implementation.
///
/// Transport calls are fire-and-observe: results of `get`/`set`/`toggle`
/// arrive here as [`TransportEvent::Data`], not as return values.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// The protocol session is established.
    Connected,
    /// The protocol session dropped.
    Disconnected,
    /// A transport failure was observed out of band.
    Error(TransportError),
    /// The device reported data, usually carrying a `dps` map.
    Data {
        /// The raw payload as received.
        payload: Value,
        /// The protocol command code the payload arrived under, if any.
        command_code: Option<u64>,
    },
}

/// An abstract stateful device-protocol client.
///
/// Implementations are driven by a single owner at a time; `disconnect` is
/// **not** guaranteed to be idempotent, so callers guard redundant calls with
/// [`is_connected`](Self::is_connected). All futures are `Send` so the owner
/// loop can be spawned onto a runtime.
pub trait Transport: Send + 'static {
    /// Looks the device up on the network, failing after `timeout`.
    fn discover(
        &mut self,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Establishes the protocol session.
    fn connect(&mut self) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Tears down the protocol session.
    fn disconnect(&mut self);

    /// Returns `true` while the session is established.
    fn is_connected(&self) -> bool;

    /// Asks the device to report its full data-point schema.
    fn request_schema(&mut self) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Writes one or more data points.
    fn write(
        &mut self,
        request: WriteRequest,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Toggles the device power.
    fn toggle(&mut self) -> impl Future<Output = Result<(), TransportError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_write_constructor() {
        let req = WriteRequest::single(20, true);
        assert_eq!(
            req,
            WriteRequest::Single {
                index: 20,
                value: json!(true)
            }
        );
    }

    #[test]
    fn multiple_write_keeps_index_order() {
        let mut data = BTreeMap::new();
        data.insert(23, json!(0));
        data.insert(20, json!(true));

        let WriteRequest::Multiple { data } = WriteRequest::multiple(data) else {
            panic!("expected a multi write");
        };
        let indexes: Vec<u8> = data.keys().copied().collect();
        assert_eq!(indexes, vec![20, 23]);
    }
}

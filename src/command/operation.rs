// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol operations produced by the router.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::transport::WriteRequest;

/// A low-level operation targeting the device.
///
/// This is the closed set of things the bridge can do with the transport;
/// every routed command resolves to zero or more of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Ask the device for its full data-point schema.
    RequestSchema,
    /// Request a (re)connect.
    Connect,
    /// Request a transport disconnect.
    Disconnect,
    /// Toggle the device power.
    Toggle,
    /// Write a single data point.
    SetSingle {
        /// The data-point index.
        index: u8,
        /// The value to write.
        value: Value,
    },
    /// Write several data points at once.
    SetMultiple {
        /// The data points to write, keyed by index.
        data: BTreeMap<u8, Value>,
    },
    /// A raw write forwarded verbatim.
    RawWrite(Value),
}

impl Operation {
    /// Returns the transport write this operation maps to, if it is a write.
    ///
    /// Lifecycle operations (schema request, connect, disconnect, toggle)
    /// return `None`; the bridge handles those through the connection
    /// manager instead.
    #[must_use]
    pub fn into_write_request(self) -> Option<WriteRequest> {
        match self {
            Self::SetSingle { index, value } => Some(WriteRequest::Single { index, value }),
            Self::SetMultiple { data } => Some(WriteRequest::Multiple { data }),
            Self::RawWrite(value) => Some(WriteRequest::Raw(value)),
            Self::RequestSchema | Self::Connect | Self::Disconnect | Self::Toggle => None,
        }
    }

    /// Returns `true` if this operation writes data points.
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Self::SetSingle { .. } | Self::SetMultiple { .. } | Self::RawWrite(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn write_operations_map_to_write_requests() {
        let op = Operation::SetSingle {
            index: 20,
            value: json!(true),
        };
        assert!(op.is_write());
        assert_eq!(
            op.into_write_request(),
            Some(WriteRequest::Single {
                index: 20,
                value: json!(true)
            })
        );
    }

    #[test]
    fn lifecycle_operations_have_no_write_request() {
        for op in [
            Operation::RequestSchema,
            Operation::Connect,
            Operation::Disconnect,
            Operation::Toggle,
        ] {
            assert!(!op.is_write());
            assert_eq!(op.into_write_request(), None);
        }
    }
}

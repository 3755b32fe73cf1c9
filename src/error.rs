// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `novalight` library.
//!
//! This module provides the error hierarchy for failures across the library:
//! value validation, command routing, transport communication, and data-point
//! parsing.
//!
//! Cancelling an absent or already-fired reconnect timer is deliberately not
//! an error anywhere in this crate; cancellation is presence-checked and
//! silently succeeds.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while routing an inbound command.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Error occurred during transport communication.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Error occurred while parsing a data-point update.
    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// Errors related to value validation and field domains.
///
/// These errors occur when an inbound payload value cannot be coerced to the
/// declared kind or falls outside the field's allowed range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range for its field.
    #[error("{field}: value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// The field being validated.
        field: String,
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// The value cannot be interpreted as a boolean.
    #[error("{field}: expected a boolean-like value, got {found}")]
    NotBoolean {
        /// The field being validated.
        field: String,
        /// Description of the offending value.
        found: String,
    },

    /// The value cannot be interpreted as an integer.
    #[error("{field}: expected an integer value, got {found}")]
    NotInteger {
        /// The field being validated.
        field: String,
        /// Description of the offending value.
        found: String,
    },

    /// No integer domain is declared for this field.
    #[error("no value domain declared for field {0}")]
    UnknownField(String),
}

/// Errors related to classifying and routing inbound commands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// A string payload did not match any known keyword.
    #[error("unknown command keyword: {0}")]
    UnknownKeyword(String),

    /// The payload shape matched none of the recognized command forms.
    #[error("unrecognized command payload")]
    UnrecognizedPayload,

    /// A multi-write carried a data-point key that is not a valid index.
    #[error("invalid data-point index: {0}")]
    InvalidDataPointIndex(String),

    /// A multi-write object was missing its `data` field.
    #[error("multi-write command is missing the data field")]
    MissingData,
}

/// Errors originating from the device transport.
///
/// These are never fatal: discovery and connect failures feed the reconnect
/// path, write failures are surfaced as status reports.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Device discovery did not answer within the timeout.
    #[error("device discovery timed out after {0} s")]
    DiscoveryTimeout(u64),

    /// Connecting to the device failed.
    #[error("connection failed: {0}")]
    ConnectFailed(String),

    /// Writing to the device failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// A transport-level socket failure.
    ///
    /// The connection manager treats this class specially and clears any
    /// pending reconnect timer when it is reported.
    #[error("socket failure: {0}")]
    Socket(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns `true` if this is a transport-level socket failure.
    #[must_use]
    pub fn is_socket_failure(&self) -> bool {
        matches!(self, Self::Socket(_))
    }
}

/// Errors related to parsing raw data-point values.
///
/// Data-point updates never fail as a whole; a key that cannot be coerced is
/// skipped and reported with one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    /// A data-point value had an unexpected JSON type.
    #[error("data point {index}: expected {expected}, got {found}")]
    UnexpectedType {
        /// The data-point index as it appeared on the wire.
        index: String,
        /// The expected JSON type.
        expected: &'static str,
        /// Description of the value that arrived.
        found: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

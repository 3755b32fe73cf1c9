// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical light state and the data-point parser.

use serde::Serialize;
use serde_json::Value;

use crate::error::DataError;

use super::DataPointUpdate;

/// Sentinel for a numeric field the device has not reported yet.
const UNKNOWN: f64 = -1.0;

/// Canonical state of a light.
///
/// Created once per device session with all-unknown sentinels and mutated
/// field-by-field by [`apply_data_points`](Self::apply_data_points); a field
/// changes only when the corresponding data-point key is present in an
/// update, so partial updates never clobber unrelated fields.
///
/// # Examples
///
/// ```
/// use novalight::state::LightState;
///
/// let state = LightState::new();
/// assert!(!state.is_on());
/// assert_eq!(state.mode, "n/a");
/// assert!((state.brightness - -1.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightState {
    /// Whether the light is on.
    pub on: bool,
    /// Work mode reported by the device ("n/a" until known).
    pub mode: String,
    /// Brightness in percent (1-100), or -1 when unknown.
    pub brightness: f64,
    /// White color temperature in wire units (0-1000), or -1 when unknown.
    pub temperature: f64,
}

impl LightState {
    /// Creates a fresh state with all-unknown sentinels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a raw data-point update in place.
    ///
    /// Values are trusted once they arrive from the device: no domain
    /// validation happens here. This function never fails; a key whose value
    /// cannot be coerced to the expected type is skipped and logged, and the
    /// remaining keys still apply.
    ///
    /// Wire semantics: key "20" is the power boolean, "21" the mode string,
    /// "22" the brightness in tenths (divided by 10 here), "23" the color
    /// temperature (unscaled).
    pub fn apply_data_points(&mut self, update: &DataPointUpdate) {
        if let Some(raw) = update.get("20") {
            match as_bool(raw, "20") {
                Ok(on) => self.on = on,
                Err(e) => tracing::warn!(error = %e, "skipping malformed data point"),
            }
        }

        if let Some(raw) = update.get("21") {
            match as_str(raw, "21") {
                Ok(mode) => self.mode = mode.to_string(),
                Err(e) => tracing::warn!(error = %e, "skipping malformed data point"),
            }
        }

        if let Some(raw) = update.get("22") {
            match as_number(raw, "22") {
                Ok(wire) => self.brightness = wire / 10.0,
                Err(e) => tracing::warn!(error = %e, "skipping malformed data point"),
            }
        }

        if let Some(raw) = update.get("23") {
            match as_number(raw, "23") {
                Ok(wire) => self.temperature = wire,
                Err(e) => tracing::warn!(error = %e, "skipping malformed data point"),
            }
        }
    }

    /// Returns `true` if the light is on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Returns a defensive copy for outbound messages.
    #[must_use]
    pub fn snapshot(&self) -> LightState {
        self.clone()
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            on: false,
            mode: "n/a".to_string(),
            brightness: UNKNOWN,
            temperature: UNKNOWN,
        }
    }
}

fn as_bool(raw: &Value, index: &str) -> Result<bool, DataError> {
    raw.as_bool().ok_or_else(|| DataError::UnexpectedType {
        index: index.to_string(),
        expected: "bool",
        found: raw.to_string(),
    })
}

fn as_str<'a>(raw: &'a Value, index: &str) -> Result<&'a str, DataError> {
    raw.as_str().ok_or_else(|| DataError::UnexpectedType {
        index: index.to_string(),
        expected: "string",
        found: raw.to_string(),
    })
}

fn as_number(raw: &Value, index: &str) -> Result<f64, DataError> {
    raw.as_f64().ok_or_else(|| DataError::UnexpectedType {
        index: index.to_string(),
        expected: "number",
        found: raw.to_string(),
    })
}

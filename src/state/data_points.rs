// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data-point indexes and the raw update map.

use serde_json::Value;

/// A raw data-point update as received from the device.
///
/// Keys are data-point indexes encoded as decimal strings (the device
/// protocol's JSON form); values are of mixed type. Updates are ephemeral
/// and not retained beyond one parse cycle.
pub type DataPointUpdate = serde_json::Map<String, Value>;

/// Data-point indexes used by Novostella lights.
pub mod dp {
    /// Power on/off (bool).
    pub const POWER: u8 = 20;
    /// Work mode ("white", "colour", ...).
    pub const MODE: u8 = 21;
    /// Brightness in wire tenths (10-1000).
    pub const BRIGHTNESS: u8 = 22;
    /// White color temperature (0-1000).
    pub const COLOR_TEMP: u8 = 23;

    /// Scale between user brightness (1-100) and wire tenths.
    pub const BRIGHTNESS_SCALE: i64 = 10;
    /// Maximum brightness in wire units.
    pub const BRIGHTNESS_WIRE_MAX: i64 = 1000;
    /// Minimum color temperature in wire units.
    pub const COLOR_TEMP_WIRE_MIN: i64 = 0;
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light state tracking.
//!
//! This module provides the canonical application-facing light state and the
//! parser that updates it from raw device data-point maps.
//!
//! # Examples
//!
//! ```
//! use novalight::state::LightState;
//! use serde_json::json;
//!
//! let mut state = LightState::new();
//! let dps = json!({"20": true, "22": 500});
//! state.apply_data_points(dps.as_object().unwrap());
//!
//! assert!(state.is_on());
//! assert!((state.brightness - 50.0).abs() < f64::EPSILON);
//! ```

mod data_points;
mod light_state;

pub use data_points::{DataPointUpdate, dp};
pub use light_state::LightState;

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command routing.
//!
//! Inbound messages carry a slash-delimited topic and a loosely-typed JSON
//! payload. The [`CommandRouter`] validates them and turns them into a closed
//! set of [`Operation`]s; payload-shape dispatch happens exactly once, at the
//! router boundary, before any routing logic runs.
//!
//! # Examples
//!
//! ```
//! use novalight::command::{CommandRouter, Operation, SymbolicCommand};
//! use serde_json::json;
//!
//! let router = CommandRouter::new();
//! let cmd = SymbolicCommand::new("home/light/ON", json!(true));
//!
//! let ops = router.route(&cmd).unwrap();
//! assert_eq!(ops, vec![Operation::SetSingle { index: 20, value: json!(true) }]);
//! ```

mod operation;
mod router;
mod symbolic;

pub use operation::Operation;
pub use router::CommandRouter;
pub use symbolic::SymbolicCommand;

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inbound symbolic commands.

use serde_json::Value;

/// Topic segment delimiter.
const TOPIC_DELIMITER: char = '/';

/// An inbound symbolic command from the host runtime.
///
/// Only the last segment of the slash-delimited topic is significant, and it
/// is matched case-insensitively. Commands are ephemeral; the router consumes
/// them and nothing retains them.
///
/// # Examples
///
/// ```
/// use novalight::command::SymbolicCommand;
/// use serde_json::json;
///
/// let cmd = SymbolicCommand::new("home/light/white", json!({"brightness": 80}));
/// assert_eq!(cmd.topic_tail(), "WHITE");
/// ```
#[derive(Debug, Clone)]
pub struct SymbolicCommand {
    /// The full topic string.
    pub topic: String,
    /// The payload; its shape depends on the topic.
    pub payload: Value,
}

impl SymbolicCommand {
    /// Creates a new symbolic command.
    #[must_use]
    pub fn new(topic: impl Into<String>, payload: Value) -> Self {
        Self {
            topic: topic.into(),
            payload,
        }
    }

    /// Returns the significant last topic segment, uppercased.
    #[must_use]
    pub fn topic_tail(&self) -> String {
        self.topic
            .rsplit(TOPIC_DELIMITER)
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn topic_tail_takes_last_segment() {
        let cmd = SymbolicCommand::new("home/livingroom/light/on", json!(true));
        assert_eq!(cmd.topic_tail(), "ON");
    }

    #[test]
    fn topic_tail_is_case_insensitive() {
        assert_eq!(SymbolicCommand::new("x/White", json!(null)).topic_tail(), "WHITE");
        assert_eq!(SymbolicCommand::new("x/wHiTe", json!(null)).topic_tail(), "WHITE");
    }

    #[test]
    fn topic_without_delimiter_is_its_own_tail() {
        assert_eq!(SymbolicCommand::new("toggle", json!(null)).topic_tail(), "TOGGLE");
    }

    #[test]
    fn empty_topic_yields_empty_tail() {
        assert_eq!(SymbolicCommand::new("", json!(null)).topic_tail(), "");
    }
}

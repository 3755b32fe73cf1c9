// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The command router.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{CommandError, Error};
use crate::format::{Format, format_value};
use crate::state::dp;

use super::{Operation, SymbolicCommand};

/// Routes inbound symbolic commands to protocol operations.
///
/// Routing is pure and never reaches the transport itself; validation
/// failures come back as `Err` and the caller decides how to report them.
///
/// # Examples
///
/// ```
/// use novalight::command::{CommandRouter, SymbolicCommand};
/// use serde_json::json;
///
/// let router = CommandRouter::new();
///
/// // White mode with explicit brightness, scaled to wire tenths.
/// let cmd = SymbolicCommand::new("dev/WHITE", json!({"brightness": 80}));
/// let ops = router.route(&cmd).unwrap();
/// assert_eq!(ops.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CommandRouter;

/// One-shot classification of a raw pass-through payload.
///
/// The upstream surface dispatches on payload shape (keyword strings,
/// booleans, object-key presence); that duck typing is resolved here, once,
/// into a tagged variant before any routing runs.
#[derive(Debug)]
enum RawPayload<'a> {
    Keyword(Keyword),
    Power(bool),
    DpsWrite(&'a Value),
    MultiWrite(&'a Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Request,
    Connect,
    Disconnect,
    Toggle,
}

impl CommandRouter {
    /// Creates a new router.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Routes a symbolic command to its protocol operations.
    ///
    /// The `COLOR` topic is recognized but currently performs no action; it
    /// routes to an empty operation list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`](crate::error::ValueError) when a payload
    /// value fails validation, or a [`CommandError`] when a raw payload
    /// matches no known shape. Either way no operation is produced.
    pub fn route(&self, command: &SymbolicCommand) -> Result<Vec<Operation>, Error> {
        match command.topic_tail().as_str() {
            "ON" => self.route_on(&command.payload),
            "WHITE" => self.route_white(&command.payload),
            "COLOR" => Ok(Vec::new()),
            _ => self.route_raw(&command.payload),
        }
    }

    /// The dedicated power topic: payload is the desired on/off state.
    fn route_on(&self, payload: &Value) -> Result<Vec<Operation>, Error> {
        let on = format_value(Format::Boolean, "on", payload)?;
        Ok(vec![Operation::SetSingle {
            index: dp::POWER,
            value: on.into_value(),
        }])
    }

    /// White mode: a multi-write of power, mode, brightness and temperature.
    ///
    /// Defaults are full brightness and the coolest temperature; a payload
    /// `brightness` (1-100) overrides key 22 after scaling to wire tenths,
    /// a payload `temperature` (0-1000) overrides key 23 unscaled.
    fn route_white(&self, payload: &Value) -> Result<Vec<Operation>, Error> {
        let mut data: BTreeMap<u8, Value> = BTreeMap::from([
            (dp::POWER, Value::Bool(true)),
            (dp::MODE, Value::from("white")),
            (dp::BRIGHTNESS, Value::from(dp::BRIGHTNESS_WIRE_MAX)),
            (dp::COLOR_TEMP, Value::from(dp::COLOR_TEMP_WIRE_MIN)),
        ]);

        if let Some(raw) = payload.get("brightness") {
            let value = format_value(Format::Integer, "brightness", raw)?;
            if let Some(percent) = value.as_int() {
                data.insert(dp::BRIGHTNESS, Value::from(percent * dp::BRIGHTNESS_SCALE));
            }
        }

        if let Some(raw) = payload.get("temperature") {
            let value = format_value(Format::Integer, "temperature", raw)?;
            if let Some(wire) = value.as_int() {
                data.insert(dp::COLOR_TEMP, Value::from(wire));
            }
        }

        Ok(vec![Operation::SetMultiple { data }])
    }

    /// Any other topic: the payload itself is the command.
    fn route_raw(&self, payload: &Value) -> Result<Vec<Operation>, Error> {
        let op = match classify(payload)? {
            RawPayload::Keyword(Keyword::Request) => Operation::RequestSchema,
            RawPayload::Keyword(Keyword::Connect) => Operation::Connect,
            RawPayload::Keyword(Keyword::Disconnect) => Operation::Disconnect,
            RawPayload::Keyword(Keyword::Toggle) => Operation::Toggle,
            // Legacy power path; kept distinct from the ON topic route.
            RawPayload::Power(on) => Operation::SetSingle {
                index: dp::POWER,
                value: Value::Bool(on),
            },
            RawPayload::DpsWrite(raw) => Operation::RawWrite(raw.clone()),
            RawPayload::MultiWrite(raw) => Operation::SetMultiple {
                data: parse_multi_data(raw)?,
            },
        };
        Ok(vec![op])
    }
}

fn classify(payload: &Value) -> Result<RawPayload<'_>, CommandError> {
    match payload {
        Value::String(s) => match s.as_str() {
            "request" => Ok(RawPayload::Keyword(Keyword::Request)),
            "connect" => Ok(RawPayload::Keyword(Keyword::Connect)),
            "disconnect" => Ok(RawPayload::Keyword(Keyword::Disconnect)),
            "toggle" => Ok(RawPayload::Keyword(Keyword::Toggle)),
            other => Err(CommandError::UnknownKeyword(other.to_string())),
        },
        Value::Bool(b) => Ok(RawPayload::Power(*b)),
        Value::Object(map) => {
            if map.contains_key("dps") {
                Ok(RawPayload::DpsWrite(payload))
            } else if map.contains_key("multiple") {
                map.get("data")
                    .map(RawPayload::MultiWrite)
                    .ok_or(CommandError::MissingData)
            } else {
                Err(CommandError::UnrecognizedPayload)
            }
        }
        _ => Err(CommandError::UnrecognizedPayload),
    }
}

fn parse_multi_data(raw: &Value) -> Result<BTreeMap<u8, Value>, CommandError> {
    let object = raw
        .as_object()
        .ok_or(CommandError::UnrecognizedPayload)?;

    let mut data = BTreeMap::new();
    for (key, value) in object {
        let index: u8 = key
            .parse()
            .map_err(|_| CommandError::InvalidDataPointIndex(key.clone()))?;
        data.insert(index, value.clone());
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;
    use serde_json::json;

    fn route(topic: &str, payload: Value) -> Result<Vec<Operation>, Error> {
        CommandRouter::new().route(&SymbolicCommand::new(topic, payload))
    }

    #[test]
    fn on_topic_validates_and_writes_power() {
        let ops = route("home/light/ON", json!(true)).unwrap();
        assert_eq!(
            ops,
            vec![Operation::SetSingle {
                index: 20,
                value: json!(true)
            }]
        );
    }

    #[test]
    fn on_topic_rejects_non_boolean() {
        let err = route("x/on", json!("not-a-boolean")).unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::NotBoolean { .. })));
    }

    #[test]
    fn white_defaults() {
        let ops = route("dev/white", json!({})).unwrap();
        let Operation::SetMultiple { data } = &ops[0] else {
            panic!("expected a multi write");
        };

        assert_eq!(data[&20], json!(true));
        assert_eq!(data[&21], json!("white"));
        assert_eq!(data[&22], json!(1000));
        assert_eq!(data[&23], json!(0));
    }

    #[test]
    fn white_with_brightness_and_temperature() {
        let ops = route("dev/WHITE", json!({"brightness": 80, "temperature": 200})).unwrap();
        let Operation::SetMultiple { data } = &ops[0] else {
            panic!("expected a multi write");
        };

        assert_eq!(data[&20], json!(true));
        assert_eq!(data[&21], json!("white"));
        assert_eq!(data[&22], json!(800));
        assert_eq!(data[&23], json!(200));
    }

    #[test]
    fn white_brightness_scales_by_ten() {
        for b in [1, 37, 100] {
            let ops = route("dev/WHITE", json!({"brightness": b})).unwrap();
            let Operation::SetMultiple { data } = &ops[0] else {
                panic!("expected a multi write");
            };
            assert_eq!(data[&22], json!(b * 10));
        }
    }

    #[test]
    fn white_brightness_out_of_range_produces_no_write() {
        for b in [0, 101] {
            let err = route("dev/WHITE", json!({"brightness": b})).unwrap_err();
            assert!(matches!(err, Error::Value(ValueError::OutOfRange { .. })));
        }
    }

    #[test]
    fn white_non_object_payload_uses_defaults() {
        let ops = route("dev/WHITE", json!("anything")).unwrap();
        let Operation::SetMultiple { data } = &ops[0] else {
            panic!("expected a multi write");
        };
        assert_eq!(data[&22], json!(1000));
    }

    #[test]
    fn color_topic_is_a_no_op() {
        assert_eq!(route("dev/COLOR", json!({"h": 120})).unwrap(), Vec::new());
    }

    #[test]
    fn keyword_payloads() {
        assert_eq!(route("dev/cmd", json!("request")).unwrap(), vec![Operation::RequestSchema]);
        assert_eq!(route("dev/cmd", json!("connect")).unwrap(), vec![Operation::Connect]);
        assert_eq!(route("dev/cmd", json!("disconnect")).unwrap(), vec![Operation::Disconnect]);
        assert_eq!(route("dev/cmd", json!("toggle")).unwrap(), vec![Operation::Toggle]);
    }

    #[test]
    fn unknown_keyword_is_an_error() {
        let err = route("dev/cmd", json!("restart")).unwrap_err();
        assert!(matches!(err, Error::Command(CommandError::UnknownKeyword(_))));
    }

    #[test]
    fn legacy_boolean_payload_writes_power() {
        let ops = route("dev/cmd", json!(false)).unwrap();
        assert_eq!(
            ops,
            vec![Operation::SetSingle {
                index: 20,
                value: json!(false)
            }]
        );
    }

    #[test]
    fn dps_object_is_forwarded_verbatim() {
        let payload = json!({"dps": 22, "set": 500});
        let ops = route("dev/cmd", payload.clone()).unwrap();
        assert_eq!(ops, vec![Operation::RawWrite(payload)]);
    }

    #[test]
    fn multiple_object_becomes_multi_write() {
        let ops = route(
            "dev/cmd",
            json!({"multiple": true, "data": {"20": true, "22": 900}}),
        )
        .unwrap();
        let Operation::SetMultiple { data } = &ops[0] else {
            panic!("expected a multi write");
        };
        assert_eq!(data[&20], json!(true));
        assert_eq!(data[&22], json!(900));
    }

    #[test]
    fn multiple_without_data_is_an_error() {
        let err = route("dev/cmd", json!({"multiple": true})).unwrap_err();
        assert!(matches!(err, Error::Command(CommandError::MissingData)));
    }

    #[test]
    fn multiple_with_bad_index_is_an_error() {
        let err = route(
            "dev/cmd",
            json!({"multiple": true, "data": {"abc": 1}}),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Command(CommandError::InvalidDataPointIndex(_))
        ));
    }

    #[test]
    fn unrecognized_payloads_are_errors() {
        assert!(route("dev/cmd", json!(42)).is_err());
        assert!(route("dev/cmd", json!({"foo": 1})).is_err());
        assert!(route("dev/cmd", json!(null)).is_err());
    }
}

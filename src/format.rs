// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Payload value validation.
//!
//! Inbound command payloads arrive as loosely-typed JSON. Before a value is
//! turned into a data-point write it is coerced against a declared
//! [`Format`] and checked against the domain of the field it targets.
//! Validation is pure: identical inputs always yield identical outputs or
//! identical failures.

use serde_json::Value;

use crate::error::ValueError;

/// The kind a payload value must be coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// A boolean-like value: JSON bool, `"true"`/`"false"`, or 0/1.
    Boolean,
    /// An integral value within the declared domain of its field.
    Integer,
}

/// A validated payload value, ready to become a data-point write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// A validated boolean.
    Bool(bool),
    /// A validated integer.
    Int(i64),
}

impl FieldValue {
    /// Converts the validated value into a JSON value for the wire.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(b),
            Self::Int(i) => Value::from(i),
        }
    }

    /// Returns the boolean, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(_) => None,
        }
    }

    /// Returns the integer, if this is an integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Bool(_) => None,
        }
    }
}

/// Inclusive integer domain for the fields this library writes.
///
/// Brightness is validated in user units (1-100) before being scaled to wire
/// tenths; color temperature is validated in wire units directly.
fn integer_domain(field: &str) -> Option<(i64, i64)> {
    match field {
        "brightness" => Some((1, 100)),
        "temperature" => Some((0, 1000)),
        _ => None,
    }
}

/// Validates and coerces a raw payload value.
///
/// # Arguments
///
/// * `format` - The kind the value must have
/// * `field` - The field name, used for domain lookup and diagnostics
/// * `raw` - The raw JSON value from the payload
///
/// # Errors
///
/// Returns a [`ValueError`] when the value cannot be coerced to `format` or
/// violates the field's domain.
///
/// # Examples
///
/// ```
/// use novalight::format::{format_value, FieldValue, Format};
/// use serde_json::json;
///
/// let v = format_value(Format::Boolean, "on", &json!(true)).unwrap();
/// assert_eq!(v, FieldValue::Bool(true));
///
/// let v = format_value(Format::Integer, "brightness", &json!(80)).unwrap();
/// assert_eq!(v, FieldValue::Int(80));
///
/// assert!(format_value(Format::Integer, "brightness", &json!(101)).is_err());
/// ```
pub fn format_value(format: Format, field: &str, raw: &Value) -> Result<FieldValue, ValueError> {
    match format {
        Format::Boolean => coerce_bool(field, raw).map(FieldValue::Bool),
        Format::Integer => {
            let value = coerce_int(field, raw)?;
            let (min, max) =
                integer_domain(field).ok_or_else(|| ValueError::UnknownField(field.to_string()))?;
            if value < min || value > max {
                return Err(ValueError::OutOfRange {
                    field: field.to_string(),
                    min,
                    max,
                    actual: value,
                });
            }
            Ok(FieldValue::Int(value))
        }
    }
}

fn coerce_bool(field: &str, raw: &Value) -> Result<bool, ValueError> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(not_boolean(field, raw)),
        },
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(not_boolean(field, raw)),
        },
        _ => Err(not_boolean(field, raw)),
    }
}

fn coerce_int(field: &str, raw: &Value) -> Result<i64, ValueError> {
    match raw {
        Value::Number(n) => n.as_i64().ok_or_else(|| not_integer(field, raw)),
        Value::String(s) => s.trim().parse().map_err(|_| not_integer(field, raw)),
        _ => Err(not_integer(field, raw)),
    }
}

fn not_boolean(field: &str, raw: &Value) -> ValueError {
    ValueError::NotBoolean {
        field: field.to_string(),
        found: raw.to_string(),
    }
}

fn not_integer(field: &str, raw: &Value) -> ValueError {
    ValueError::NotInteger {
        field: field.to_string(),
        found: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn boolean_from_bool() {
        assert_eq!(
            format_value(Format::Boolean, "on", &json!(true)).unwrap(),
            FieldValue::Bool(true)
        );
        assert_eq!(
            format_value(Format::Boolean, "on", &json!(false)).unwrap(),
            FieldValue::Bool(false)
        );
    }

    #[test]
    fn boolean_from_string() {
        assert_eq!(
            format_value(Format::Boolean, "on", &json!("true")).unwrap(),
            FieldValue::Bool(true)
        );
        assert_eq!(
            format_value(Format::Boolean, "on", &json!("FALSE")).unwrap(),
            FieldValue::Bool(false)
        );
    }

    #[test]
    fn boolean_from_number() {
        assert_eq!(
            format_value(Format::Boolean, "on", &json!(1)).unwrap(),
            FieldValue::Bool(true)
        );
        assert_eq!(
            format_value(Format::Boolean, "on", &json!(0)).unwrap(),
            FieldValue::Bool(false)
        );
    }

    #[test]
    fn boolean_rejects_non_boolean() {
        let err = format_value(Format::Boolean, "on", &json!("not-a-boolean")).unwrap_err();
        assert!(matches!(err, ValueError::NotBoolean { .. }));

        assert!(format_value(Format::Boolean, "on", &json!(2)).is_err());
        assert!(format_value(Format::Boolean, "on", &json!({"set": true})).is_err());
    }

    #[test]
    fn brightness_domain() {
        for v in [1, 50, 100] {
            assert_eq!(
                format_value(Format::Integer, "brightness", &json!(v)).unwrap(),
                FieldValue::Int(v)
            );
        }

        for v in [0, 101, -5] {
            let err = format_value(Format::Integer, "brightness", &json!(v)).unwrap_err();
            assert!(matches!(err, ValueError::OutOfRange { min: 1, max: 100, .. }));
        }
    }

    #[test]
    fn temperature_domain() {
        assert_eq!(
            format_value(Format::Integer, "temperature", &json!(0)).unwrap(),
            FieldValue::Int(0)
        );
        assert_eq!(
            format_value(Format::Integer, "temperature", &json!(1000)).unwrap(),
            FieldValue::Int(1000)
        );
        assert!(format_value(Format::Integer, "temperature", &json!(1001)).is_err());
    }

    #[test]
    fn integer_from_numeric_string() {
        assert_eq!(
            format_value(Format::Integer, "brightness", &json!("80")).unwrap(),
            FieldValue::Int(80)
        );
    }

    #[test]
    fn integer_rejects_fractional() {
        assert!(format_value(Format::Integer, "brightness", &json!(50.5)).is_err());
    }

    #[test]
    fn integer_unknown_field() {
        let err = format_value(Format::Integer, "hue", &json!(180)).unwrap_err();
        assert_eq!(err, ValueError::UnknownField("hue".to_string()));
    }

    #[test]
    fn field_value_conversions() {
        assert_eq!(FieldValue::Bool(true).into_value(), json!(true));
        assert_eq!(FieldValue::Int(800).into_value(), json!(800));
        assert_eq!(FieldValue::Bool(true).as_bool(), Some(true));
        assert_eq!(FieldValue::Bool(true).as_int(), None);
        assert_eq!(FieldValue::Int(7).as_int(), Some(7));
    }
}

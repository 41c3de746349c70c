//! Value coercion.
//!
//! Every raw value maps to some typed value; coercion never fails. Empty or
//! absent input yields the zero value of the field type.

use std::borrow::Cow;

use chrono::NaiveDate;
use mbs_model::{FieldSchema, FieldType, FieldValue, SOURCE_DATE_FORMAT};
use serde_json::Value;

/// Coerce a raw value to the given field type.
pub fn coerce_value(field_type: FieldType, raw: Option<&str>) -> FieldValue {
    let raw = raw.unwrap_or_default();
    if raw.is_empty() {
        return FieldValue::zero(field_type);
    }

    match field_type {
        FieldType::Boolean => FieldValue::Boolean(raw.eq_ignore_ascii_case("Y")),
        FieldType::Date => FieldValue::Date(parse_source_date(raw)),
        FieldType::Numeric => FieldValue::Numeric(parse_numeric(raw)),
        FieldType::String => FieldValue::String(raw.to_string()),
    }
}

/// Coerce a raw value using the type the schema declares for `field`.
pub fn coerce_field(schema: &FieldSchema, field: &str, raw: Option<&str>) -> FieldValue {
    coerce_value(schema.type_of(field), raw)
}

/// Parse a strict `DD.MM.YYYY` date.
///
/// Day and month must have exactly two digits and the year four; anything
/// else, including surrounding whitespace, is rejected.
pub fn parse_source_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'.' || bytes[5] != b'.' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(idx, byte)| idx == 2 || idx == 5 || byte.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(raw, SOURCE_DATE_FORMAT).ok()
}

/// Parse a base-10 float, falling back to `0.0`.
///
/// Non-finite results (`inf`, `NaN`, overflow) also fall back, since they
/// have no JSON representation.
pub fn parse_numeric(raw: &str) -> f64 {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Text form of a raw JSON value, if it has one.
///
/// Strings, numbers and booleans are text; `null`, arrays and objects are not.
pub fn raw_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text)),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Text used to coerce an optional field's value.
///
/// `null` reads as empty; nested structures are kept as compact JSON.
pub(crate) fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
        scalar => raw_text(scalar).unwrap_or_default(),
    }
}

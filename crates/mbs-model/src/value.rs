//! Typed field values produced by coercion.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::schema::FieldType;

/// Output date format (ISO 8601 calendar date).
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format used by the source dataset.
pub const SOURCE_DATE_FORMAT: &str = "%d.%m.%Y";

/// A schema-typed value.
///
/// Serializes as a bare JSON string, boolean, number, or `null` for a
/// missing date.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Boolean(bool),
    Date(Option<NaiveDate>),
    Numeric(f64),
}

impl FieldValue {
    /// The zero value a field of this type takes when it has no usable input.
    pub fn zero(field_type: FieldType) -> Self {
        match field_type {
            FieldType::String => FieldValue::String(String::new()),
            FieldType::Boolean => FieldValue::Boolean(false),
            FieldType::Date => FieldValue::Date(None),
            FieldType::Numeric => FieldValue::Numeric(0.0),
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::String(_) => FieldType::String,
            FieldValue::Boolean(_) => FieldType::Boolean,
            FieldValue::Date(_) => FieldType::Date,
            FieldValue::Numeric(_) => FieldType::Numeric,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Renders the value back in the notation of the source dataset
    /// (`Y`/`N` flags, `DD.MM.YYYY` dates).
    ///
    /// Coercing the returned text with the same type yields this value again.
    pub fn to_source_text(&self) -> String {
        match self {
            FieldValue::String(value) => value.clone(),
            FieldValue::Boolean(true) => "Y".to_string(),
            FieldValue::Boolean(false) => "N".to_string(),
            FieldValue::Date(Some(date)) => date.format(SOURCE_DATE_FORMAT).to_string(),
            FieldValue::Date(None) => String::new(),
            FieldValue::Numeric(value) => value.to_string(),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::String(value) => serializer.serialize_str(value),
            FieldValue::Boolean(value) => serializer.serialize_bool(*value),
            FieldValue::Date(Some(date)) => serializer.collect_str(&date.format(ISO_DATE_FORMAT)),
            FieldValue::Date(None) => serializer.serialize_none(),
            FieldValue::Numeric(value) => serializer.serialize_f64(*value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values() {
        assert_eq!(
            FieldValue::zero(FieldType::String),
            FieldValue::String(String::new())
        );
        assert_eq!(
            FieldValue::zero(FieldType::Boolean),
            FieldValue::Boolean(false)
        );
        assert_eq!(FieldValue::zero(FieldType::Date), FieldValue::Date(None));
        assert_eq!(
            FieldValue::zero(FieldType::Numeric),
            FieldValue::Numeric(0.0)
        );
    }

    #[test]
    fn test_source_text() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(FieldValue::Date(Some(date)).to_source_text(), "05.03.2024");
        assert_eq!(FieldValue::Boolean(true).to_source_text(), "Y");
        assert_eq!(FieldValue::Numeric(12.5).to_source_text(), "12.5");
        assert_eq!(FieldValue::Date(None).to_source_text(), "");
    }
}

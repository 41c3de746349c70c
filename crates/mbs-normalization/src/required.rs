//! Required field checks.
//!
//! A record passes when every required field is present and holds a
//! non-empty JSON string. Numbers, booleans, `null` and nested structures are
//! rejected. Failing records are dropped whole, never patched.

use mbs_model::FieldSchema;
use serde_json::{Map, Value};

use crate::report::RejectionReason;

/// Check the required fields of one record in declaration order.
///
/// Returns the first failure.
pub fn check_required(
    schema: &FieldSchema,
    record: &Map<String, Value>,
) -> Result<(), RejectionReason> {
    for definition in schema.required_fields() {
        let field = &definition.name;
        let Some(value) = record.get(field) else {
            return Err(RejectionReason::MissingRequired {
                field: field.clone(),
            });
        };
        let Value::String(text) = value else {
            return Err(RejectionReason::NotText {
                field: field.clone(),
            });
        };
        if text.is_empty() {
            return Err(RejectionReason::EmptyRequired {
                field: field.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbs_model::mbs_schema;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_complete_record_passes() {
        let record = object(json!({"ItemNum": "23", "Description": "Consult"}));
        assert_eq!(check_required(mbs_schema(), &record), Ok(()));
    }

    #[test]
    fn test_first_failing_field_is_reported() {
        let record = object(json!({"Description": ""}));
        assert_eq!(
            check_required(mbs_schema(), &record),
            Err(RejectionReason::MissingRequired {
                field: "ItemNum".to_string()
            })
        );
    }

    #[test]
    fn test_empty_and_non_text_values() {
        let record = object(json!({"ItemNum": "23", "Description": ""}));
        assert_eq!(
            check_required(mbs_schema(), &record),
            Err(RejectionReason::EmptyRequired {
                field: "Description".to_string()
            })
        );

        let record = object(json!({"ItemNum": {"-id": "23"}, "Description": "x"}));
        assert_eq!(
            check_required(mbs_schema(), &record),
            Err(RejectionReason::NotText {
                field: "ItemNum".to_string()
            })
        );

        let record = object(json!({"ItemNum": null, "Description": "x"}));
        assert!(matches!(
            check_required(mbs_schema(), &record),
            Err(RejectionReason::NotText { .. })
        ));
    }

    #[test]
    fn test_required_scalars_must_be_strings() {
        let record = object(json!({"ItemNum": 23, "Description": "Consult"}));
        assert_eq!(
            check_required(mbs_schema(), &record),
            Err(RejectionReason::NotText {
                field: "ItemNum".to_string()
            })
        );

        let record = object(json!({"ItemNum": "23", "Description": true}));
        assert_eq!(
            check_required(mbs_schema(), &record),
            Err(RejectionReason::NotText {
                field: "Description".to_string()
            })
        );
    }
}

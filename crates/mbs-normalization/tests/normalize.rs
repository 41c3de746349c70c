//! End-to-end behaviour of the normalization engine.

use chrono::NaiveDate;
use mbs_model::{FieldValue, ITEMS_COLLECTION, NormalizedRecord, mbs_schema};
use mbs_normalization::{NormalizationError, RejectionReason, normalize_document, normalize_items};
use serde_json::{Value, json};

fn item_num(record: &NormalizedRecord) -> &str {
    record
        .get("ItemNum")
        .and_then(FieldValue::as_str)
        .unwrap_or_default()
}

#[test]
fn record_missing_description_is_dropped_and_order_kept() {
    let document = json!({
        "MBS_Items": [
            {"ItemNum": "1", "Description": "First", "ScheduleFee": "12.50"},
            {"ItemNum": "2", "NewItem": "Y"},
            {"ItemNum": "3", "Description": "Third", "ItemStartDate": "05.03.2024"},
        ]
    });

    let outcome = normalize_document(&document, ITEMS_COLLECTION, mbs_schema()).unwrap();
    let records = &outcome.record_set.records;

    assert_eq!(records.len(), 2);
    assert_eq!(item_num(&records[0]), "1");
    assert_eq!(item_num(&records[1]), "3");

    let expected_fields = vec![
        "Description",
        "ItemNum",
        "ItemStartDate",
        "NewItem",
        "ScheduleFee",
    ];
    for record in records {
        assert_eq!(record.field_names().collect::<Vec<_>>(), expected_fields);
    }

    assert_eq!(
        records[0].get("ScheduleFee"),
        Some(&FieldValue::Numeric(12.5))
    );
    assert_eq!(
        records[0].get("ItemStartDate"),
        Some(&FieldValue::Date(None))
    );
    assert_eq!(
        records[1].get("ItemStartDate"),
        Some(&FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 5)))
    );
    assert_eq!(
        records[1].get("ScheduleFee"),
        Some(&FieldValue::Numeric(0.0))
    );

    assert_eq!(outcome.rejections.len(), 1);
    assert_eq!(outcome.rejections[0].index, 1);
    assert_eq!(
        outcome.rejections[0].reason,
        RejectionReason::MissingRequired {
            field: "Description".to_string()
        }
    );
}

#[test]
fn rejected_record_fields_still_join_the_union() {
    let items = vec![
        json!({"ItemNum": "1", "Description": "Kept"}),
        json!({"Description": "Dropped", "EMSNCap": "300.00", "Note": "only here"}),
    ];

    let outcome = normalize_items(&items, mbs_schema(), ITEMS_COLLECTION).unwrap();

    assert_eq!(outcome.field_union.len(), 4);
    assert!(outcome.field_union.contains("ItemNum"));
    assert!(outcome.field_union.contains("Description"));
    assert!(outcome.field_union.contains("Note"));
    assert!(outcome.field_union.contains("EMSNCap"));

    let records = &outcome.record_set.records;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("EMSNCap"), Some(&FieldValue::Numeric(0.0)));
    assert_eq!(
        records[0].get("Note"),
        Some(&FieldValue::String(String::new()))
    );
}

#[test]
fn record_missing_item_number_never_appears() {
    let items = vec![
        json!({"Description": "No number", "NewItem": "Y"}),
        json!({"ItemNum": "", "Description": "Empty number"}),
        json!({"ItemNum": "10", "Description": "Fine"}),
    ];

    let outcome = normalize_items(&items, mbs_schema(), ITEMS_COLLECTION).unwrap();

    assert_eq!(outcome.record_set.len(), 1);
    assert_eq!(item_num(&outcome.record_set.records[0]), "10");
    assert_eq!(outcome.summary.total_records, 3);
    assert_eq!(outcome.summary.rejected_records, 2);

    let counts = outcome.rejection_counts();
    assert_eq!(counts.get("missing_required"), Some(&1));
    assert_eq!(counts.get("empty_required"), Some(&1));
}

#[test]
fn boolean_flags_coerce_case_insensitively() {
    let items = vec![
        json!({"ItemNum": "1", "Description": "a", "NewItem": "Y", "Anaes": "y", "FeeChange": "N"}),
        json!({"ItemNum": "2", "Description": "b"}),
    ];

    let outcome = normalize_items(&items, mbs_schema(), ITEMS_COLLECTION).unwrap();
    let records = &outcome.record_set.records;

    assert_eq!(records[0].get("NewItem"), Some(&FieldValue::Boolean(true)));
    assert_eq!(records[0].get("Anaes"), Some(&FieldValue::Boolean(true)));
    assert_eq!(
        records[0].get("FeeChange"),
        Some(&FieldValue::Boolean(false))
    );
    assert_eq!(records[1].get("NewItem"), Some(&FieldValue::Boolean(false)));
}

#[test]
fn output_document_has_single_collection_key() {
    let document = json!({
        "MBS_Items": [
            {"ItemNum": "1", "Description": "a", "ItemEndDate": "2024-03-05", "Benefit75": "abc"}
        ]
    });

    let outcome = normalize_document(&document, ITEMS_COLLECTION, mbs_schema()).unwrap();
    let rendered = serde_json::to_value(&outcome.record_set).unwrap();

    assert_eq!(
        rendered,
        json!({
            "MBS_Items": [
                {"Benefit75": 0.0, "Description": "a", "ItemEndDate": null, "ItemNum": "1"}
            ]
        })
    );
}

#[test]
fn empty_array_is_fatal() {
    let document = json!({ "MBS_Items": [] });
    let result = normalize_document(&document, ITEMS_COLLECTION, mbs_schema());
    assert!(matches!(result, Err(NormalizationError::EmptyCollection { .. })));
}

#[test]
fn all_records_rejected_yields_empty_set() {
    let items: Vec<Value> = vec![json!({"ItemNum": "1"}), json!(42)];
    let outcome = normalize_items(&items, mbs_schema(), ITEMS_COLLECTION).unwrap();

    assert!(outcome.record_set.is_empty());
    assert_eq!(outcome.summary.valid_records, 0);
    assert_eq!(outcome.summary.field_count, 1);
}

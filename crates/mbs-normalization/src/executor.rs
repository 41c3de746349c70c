//! Two-pass normalization of a raw record collection.
//!
//! Pass one discovers the field union over all items. Pass two drops items
//! that fail the required-field check and rebuilds the rest over the full
//! union, in source order.

use mbs_model::{FieldSchema, NormalizedRecord, NormalizedRecordSet};
use serde_json::{Map, Value};

use crate::coerce::{coerce_field, value_text};
use crate::error::{NormalizationError, Result};
use crate::report::{
    NormalizationOutcome, NormalizationSummary, RecordRejection, RejectionReason,
};
use crate::required::check_required;
use crate::union::{FieldUnion, discover_field_union};

/// Normalize the collection stored under `collection` in a converted document.
///
/// The document must be an object whose `collection` member is a non-empty
/// array; otherwise nothing is normalized and the structural error is
/// returned.
pub fn normalize_document(
    document: &Value,
    collection: &str,
    schema: &FieldSchema,
) -> Result<NormalizationOutcome> {
    let root = document
        .as_object()
        .ok_or(NormalizationError::DocumentNotObject {
            found: json_kind(document),
        })?;
    let items = root
        .get(collection)
        .ok_or_else(|| NormalizationError::MissingCollection {
            collection: collection.to_string(),
        })?;
    let items = items
        .as_array()
        .ok_or_else(|| NormalizationError::NotAnArray {
            collection: collection.to_string(),
            found: json_kind(items),
        })?;
    normalize_items(items, schema, collection)
}

/// Normalize a sequence of raw items into a record set named `collection`.
///
/// Fails only when `items` is empty.
pub fn normalize_items(
    items: &[Value],
    schema: &FieldSchema,
    collection: &str,
) -> Result<NormalizationOutcome> {
    if items.is_empty() {
        return Err(NormalizationError::EmptyCollection {
            collection: collection.to_string(),
        });
    }

    // The union includes fields seen only on items rejected below; surviving
    // records carry them with zero values.
    let field_union = discover_field_union(items);
    tracing::debug!(
        field_count = field_union.len(),
        "discovered field union"
    );

    let mut records = Vec::with_capacity(items.len());
    let mut rejections = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let Some(record) = item.as_object() else {
            rejections.push(RecordRejection {
                index,
                reason: RejectionReason::NotAnObject,
            });
            continue;
        };

        if let Err(reason) = check_required(schema, record) {
            tracing::debug!(index, reason = %reason, "dropping record");
            rejections.push(RecordRejection { index, reason });
            continue;
        }

        records.push(rebuild_record(schema, &field_union, record));
    }

    let summary = NormalizationSummary {
        total_records: items.len(),
        valid_records: records.len(),
        rejected_records: rejections.len(),
        field_count: field_union.len(),
    };
    tracing::debug!(
        total = summary.total_records,
        valid = summary.valid_records,
        rejected = summary.rejected_records,
        "normalization complete"
    );

    Ok(NormalizationOutcome {
        record_set: NormalizedRecordSet::new(collection, records),
        field_union,
        rejections,
        summary,
    })
}

/// Build a normalized record covering every union field.
///
/// Fields the record lacks are coerced from the empty string, giving the
/// zero value of their declared type.
pub fn rebuild_record(
    schema: &FieldSchema,
    field_union: &FieldUnion,
    record: &Map<String, Value>,
) -> NormalizedRecord {
    field_union
        .iter()
        .map(|name| {
            let raw = record.get(name).map(value_text);
            (name.to_string(), coerce_field(schema, name, raw.as_deref()))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

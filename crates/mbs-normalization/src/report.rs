//! Diagnostics returned by a normalization run.

use std::collections::BTreeMap;
use std::fmt;

use mbs_model::NormalizedRecordSet;
use serde::Serialize;

use crate::union::FieldUnion;

/// Why a raw record was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    /// The item is not a JSON object.
    NotAnObject,
    /// A required field is absent.
    MissingRequired { field: String },
    /// A required field holds something other than a string.
    NotText { field: String },
    /// A required field is the empty string.
    EmptyRequired { field: String },
}

impl RejectionReason {
    /// Short machine-friendly label.
    pub fn label(&self) -> &'static str {
        match self {
            RejectionReason::NotAnObject => "not_an_object",
            RejectionReason::MissingRequired { .. } => "missing_required",
            RejectionReason::NotText { .. } => "not_text",
            RejectionReason::EmptyRequired { .. } => "empty_required",
        }
    }

    /// The offending field, if the rejection is about one.
    pub fn field(&self) -> Option<&str> {
        match self {
            RejectionReason::NotAnObject => None,
            RejectionReason::MissingRequired { field }
            | RejectionReason::NotText { field }
            | RejectionReason::EmptyRequired { field } => Some(field),
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NotAnObject => write!(f, "not an object"),
            RejectionReason::MissingRequired { field } => {
                write!(f, "missing required field '{field}'")
            }
            RejectionReason::NotText { field } => {
                write!(f, "required field '{field}' is not a string")
            }
            RejectionReason::EmptyRequired { field } => {
                write!(f, "required field '{field}' is empty")
            }
        }
    }
}

/// A dropped record, identified by its position in the source array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRejection {
    pub index: usize,
    pub reason: RejectionReason,
}

impl fmt::Display for RecordRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item at index {}: {}", self.index, self.reason)
    }
}

/// Counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationSummary {
    pub total_records: usize,
    pub valid_records: usize,
    pub rejected_records: usize,
    /// Size of the field union, i.e. fields per output record.
    pub field_count: usize,
}

/// Everything a normalization run produces.
#[derive(Debug, Clone)]
pub struct NormalizationOutcome {
    pub record_set: NormalizedRecordSet,
    pub field_union: FieldUnion,
    pub rejections: Vec<RecordRejection>,
    pub summary: NormalizationSummary,
}

impl NormalizationOutcome {
    /// Rejection counts keyed by reason label.
    pub fn rejection_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for rejection in &self.rejections {
            *counts.entry(rejection.reason.label()).or_insert(0) += 1;
        }
        counts
    }
}

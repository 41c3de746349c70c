//! Schema-driven normalization of MBS item records.
//!
//! Takes the loosely-typed record collection produced by XML to JSON
//! conversion and returns a record set in which every record carries the
//! full field union with schema-typed values. Records missing a required
//! field are dropped and reported, never patched.
//!
//! # Example
//!
//! ```ignore
//! use mbs_model::{ITEMS_COLLECTION, mbs_schema};
//! use mbs_normalization::normalize_document;
//!
//! let outcome = normalize_document(&document, ITEMS_COLLECTION, mbs_schema())?;
//! for rejection in &outcome.rejections {
//!     tracing::warn!(%rejection, "skipped item");
//! }
//! ```

mod coerce;
mod error;
mod executor;
mod report;
mod required;
mod union;

// === Error Types ===
pub use error::{NormalizationError, Result};

// === Coercion ===
pub use coerce::{coerce_field, coerce_value, parse_numeric, parse_source_date, raw_text};

// === Validation ===
pub use required::check_required;
pub use union::{FieldUnion, discover_field_union};

// === Execution ===
pub use executor::{normalize_document, normalize_items, rebuild_record};
pub use report::{
    NormalizationOutcome, NormalizationSummary, RecordRejection, RejectionReason,
};

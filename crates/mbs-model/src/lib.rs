//! Data model for the MBS item dataset.
//!
//! - [`FieldSchema`]: declared field types and required fields, open to
//!   undeclared names
//! - [`FieldValue`]: a coerced, schema-typed value
//! - [`NormalizedRecord`] / [`NormalizedRecordSet`]: the validated output

pub mod record;
pub mod schema;
pub mod value;

pub use record::{ITEMS_COLLECTION, NormalizedRecord, NormalizedRecordSet};
pub use schema::{FieldDefinition, FieldSchema, FieldType, mbs_schema};
pub use value::{FieldValue, ISO_DATE_FORMAT, SOURCE_DATE_FORMAT};

//! Fatal structural errors of the normalization stage.

use thiserror::Error;

/// Errors that stop a normalization run before any record is processed.
///
/// Per-record problems are never errors; they are reported as
/// [`RecordRejection`](crate::RecordRejection)s.
#[derive(Debug, Error)]
pub enum NormalizationError {
    /// The converted document is not a JSON object.
    #[error("expected a JSON object at the document root, found {found}")]
    DocumentNotObject { found: &'static str },

    /// The record collection is absent from the document.
    #[error("{collection} is missing from the document")]
    MissingCollection { collection: String },

    /// The record collection is not an array.
    #[error("{collection} is not an array (found {found})")]
    NotAnArray {
        collection: String,
        found: &'static str,
    },

    /// The record collection holds no records.
    #[error("{collection} array is empty")]
    EmptyCollection { collection: String },
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NormalizationError::NotAnArray {
            collection: "MBS_Items".to_string(),
            found: "object",
        };
        assert_eq!(err.to_string(), "MBS_Items is not an array (found object)");

        let err = NormalizationError::EmptyCollection {
            collection: "MBS_Items".to_string(),
        };
        assert_eq!(err.to_string(), "MBS_Items array is empty");
    }
}

//! Error types for MBS data acquisition.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching or converting the source XML.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Network Errors ===
    /// HTTP request could not be built or sent.
    #[error("failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status.
    #[error("download of {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    // === File System Errors ===
    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === XML Errors ===
    /// The XML is malformed.
    #[error("failed to parse XML at byte {position}: {message}")]
    XmlParse { position: u64, message: String },

    /// The XML has no root element.
    #[error("XML document has no root element")]
    EmptyDocument,

    /// The converted tree does not have the expected shape.
    #[error("unexpected JSON structure: {reason}")]
    UnexpectedStructure { reason: String },

    // === Release Errors ===
    /// The XML link does not carry a release date.
    #[error("no release date found in XML link: {link}")]
    MissingReleaseDate { link: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

//! Error types for delivery sinks.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while handing the output document to a sink.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeliveryError {
    /// The command template is blank once the placeholder is filled in.
    #[error("empty command")]
    EmptyCommand,

    /// The command could not be started.
    #[error("failed to start command `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited unsuccessfully.
    #[error("command `{command}` failed ({status})\nOutput: {output}")]
    CommandFailed {
        command: String,
        status: String,
        output: String,
    },

    /// The webhook header JSON could not be parsed.
    #[error("failed to parse webhook headers: {source}")]
    InvalidHeaders {
        #[source]
        source: serde_json::Error,
    },

    /// A webhook header name or value is not valid HTTP.
    #[error("invalid webhook header '{name}'")]
    InvalidHeader { name: String },

    /// The document to deliver could not be read.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The webhook request could not be sent.
    #[error("failed to send webhook to {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The webhook endpoint answered with a non-2xx status.
    #[error("webhook failed with status {status}: {body}")]
    WebhookStatus { status: u16, body: String },
}

/// Result type alias for delivery operations.
pub type Result<T> = std::result::Result<T, DeliveryError>;


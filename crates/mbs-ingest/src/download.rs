//! Source acquisition: HTTP download or local file.

use std::path::Path;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

use crate::error::{IngestError, Result};

/// User agent string for download requests.
const USER_AGENT_VALUE: &str = concat!("mbs-normalizer/", env!("CARGO_PKG_VERSION"));

/// HTTP request timeout. The full schedule is tens of megabytes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Download the XML document at `url`.
///
/// Anything other than `200 OK` is an error; there are no retries.
pub fn fetch_xml(url: &str) -> Result<Vec<u8>> {
    let download_error = |source| IngestError::Download {
        url: url.to_string(),
        source,
    };

    tracing::info!(url, "downloading XML");
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(download_error)?;

    let response = client
        .get(url)
        .header(USER_AGENT, USER_AGENT_VALUE)
        .send()
        .map_err(download_error)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(IngestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().map_err(download_error)?;
    tracing::info!(bytes = bytes.len(), "downloaded XML");
    Ok(bytes.to_vec())
}

/// Read a local XML file.
pub fn read_xml_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

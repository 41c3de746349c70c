//! Webhook sink: POSTs the output document to a URL.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::error::{DeliveryError, Result};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Parse a JSON object of header names to values, e.g.
/// `{"Authorization": "Bearer token"}`.
pub fn parse_headers(raw: &str) -> Result<BTreeMap<String, String>> {
    serde_json::from_str(raw).map_err(|source| DeliveryError::InvalidHeaders { source })
}

/// Build the request headers: `Content-Type: application/json`, then the
/// custom headers, which replace defaults of the same name.
pub fn build_headers(custom: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in custom {
        let invalid = || DeliveryError::InvalidHeader { name: name.clone() };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

/// Delivers the output document to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    url: String,
    headers: BTreeMap<String, String>,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Sink with headers given as a JSON object string; blank means none.
    pub fn with_header_json(url: impl Into<String>, raw_headers: Option<&str>) -> Result<Self> {
        let mut sink = Self::new(url);
        if let Some(raw) = raw_headers.filter(|raw| !raw.trim().is_empty()) {
            sink.headers = parse_headers(raw)?;
        }
        Ok(sink)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST the file at `path` as the request body.
    pub fn send(&self, path: &Path) -> Result<()> {
        let body = std::fs::read(path).map_err(|source| DeliveryError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let headers = build_headers(&self.headers)?;

        let request_error = |source| DeliveryError::Request {
            url: self.url.clone(),
            source,
        };
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(request_error)?;

        tracing::debug!(url = %self.url, bytes = body.len(), "sending webhook");
        let response = client
            .post(&self.url)
            .headers(headers)
            .body(body)
            .send()
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(DeliveryError::WebhookStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(url = %self.url, "webhook sent successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_parse_headers() {
        let raw = r#"{"Authorization":"Bearer token","X-API-Key":"key"}"#;
        let headers = parse_headers(raw).unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["X-API-Key"], "key");

        assert!(matches!(
            parse_headers(r#"["not", "an", "object"]"#),
            Err(DeliveryError::InvalidHeaders { .. })
        ));
    }

    #[test]
    fn test_custom_headers_replace_defaults() {
        let custom = BTreeMap::from([
            (
                "Content-Type".to_string(),
                "application/vnd.mbs+json".to_string(),
            ),
            ("X-API-Key".to_string(), "key".to_string()),
        ]);
        let headers = build_headers(&custom).unwrap();

        assert_eq!(headers.get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(headers[CONTENT_TYPE], "application/vnd.mbs+json");
        assert_eq!(headers["x-api-key"], "key");
    }

    #[test]
    fn test_invalid_header_name() {
        let custom = BTreeMap::from([("Bad Header".to_string(), "v".to_string())]);
        assert!(matches!(
            build_headers(&custom),
            Err(DeliveryError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_blank_header_json_means_none() {
        let sink =
            WebhookSink::with_header_json("https://example.org/hook", Some("  ")).unwrap();
        assert_eq!(sink.url(), "https://example.org/hook");
        assert!(sink.headers.is_empty());
    }

    #[test]
    fn test_send_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("mbs_20240301.json");
        let sink = WebhookSink::new("https://example.org/hook");
        match sink.send(&missing) {
            Err(DeliveryError::FileRead { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected read failure, got {other:?}"),
        }
    }
}

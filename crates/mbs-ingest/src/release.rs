//! Release identification and the "already downloaded" check.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{IngestError, Result};

/// Release date embedded in the XML file name, e.g. `MBS-XML-20240301.XML`.
static RELEASE_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"MBS-XML-(\d{8})\.XML").expect("Invalid release link regex")
});

/// Extract the `YYYYMMDD` release date from an XML link.
pub fn release_date_from_link(link: &str) -> Result<String> {
    RELEASE_LINK_REGEX
        .captures(link)
        .and_then(|captures| captures.get(1))
        .map(|date| date.as_str().to_string())
        .ok_or_else(|| IngestError::MissingReleaseDate {
            link: link.to_string(),
        })
}

/// Whether any file in `download_dir` already carries `release_date` in its
/// name. A missing directory holds no releases.
pub fn has_release(download_dir: &Path, release_date: &str) -> Result<bool> {
    if !download_dir.is_dir() {
        return Ok(false);
    }

    let entries = std::fs::read_dir(download_dir).map_err(|e| IngestError::DirectoryRead {
        path: download_dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: download_dir.to_path_buf(),
            source: e,
        })?;
        if entry.file_name().to_string_lossy().contains(release_date) {
            tracing::debug!(
                file = %entry.path().display(),
                release_date,
                "found existing release"
            );
            return Ok(true);
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_release_date_from_link() {
        let link = "https://www.mbsonline.gov.au/internet/mbsonline/publishing.nsf/Content/x/$File/MBS-XML-20240301.XML";
        assert_eq!(release_date_from_link(link).unwrap(), "20240301");
    }

    #[test]
    fn test_release_date_requires_eight_digits() {
        assert!(matches!(
            release_date_from_link("MBS-XML-202403.XML"),
            Err(IngestError::MissingReleaseDate { .. })
        ));
        assert!(release_date_from_link("mbs-xml-20240301.xml").is_err());
    }

    #[test]
    fn test_has_release() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("mbs_20240301.json"), "{}").unwrap();

        assert!(has_release(dir.path(), "20240301").unwrap());
        assert!(!has_release(dir.path(), "20240401").unwrap());
        let missing = dir.path().join("missing");
        assert!(!has_release(&missing, "20240301").unwrap());
    }
}

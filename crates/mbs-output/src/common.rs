//! Shared helpers for output writers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// File name prefix of normalized release documents.
pub const OUTPUT_FILE_PREFIX: &str = "mbs_";

/// File name for the normalized document of a release, e.g. `mbs_20240301.json`.
pub fn output_file_name(release_date: &str) -> String {
    format!("{OUTPUT_FILE_PREFIX}{release_date}.json")
}

/// Ensure the parent directory of a path exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

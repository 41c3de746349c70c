//! JSON output of the normalized record set.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mbs_model::NormalizedRecordSet;

use crate::common::{ensure_parent_dir, output_file_name};

/// Render the record set as indented JSON with a trailing newline.
pub fn render_record_set(record_set: &NormalizedRecordSet) -> Result<String> {
    let mut rendered =
        serde_json::to_string_pretty(record_set).context("serialize normalized records")?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write the rendered record set to `path`, creating parent directories.
pub fn write_record_set(path: &Path, record_set: &NormalizedRecordSet) -> Result<()> {
    let rendered = render_record_set(record_set)?;
    ensure_parent_dir(path)?;
    fs::write(path, rendered).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        records = record_set.len(),
        "saved JSON data"
    );
    Ok(())
}

/// Write the record set of a release into `output_dir` as `mbs_<date>.json`.
pub fn write_release_output(
    output_dir: &Path,
    release_date: &str,
    record_set: &NormalizedRecordSet,
) -> Result<PathBuf> {
    let path = output_dir.join(output_file_name(release_date));
    write_record_set(&path, record_set)?;
    Ok(path)
}

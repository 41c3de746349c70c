use std::collections::BTreeMap;
use std::path::PathBuf;

use mbs_delivery::ExecutionMode;
use mbs_normalization::{NormalizationOutcome, NormalizationSummary};

/// Default directory for downloaded releases.
pub const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

/// Settings for one `fetch` run, folded from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub xml_url: String,
    pub download_dir: PathBuf,
    /// Process the release even if it is already in `download_dir`.
    pub force: bool,
    pub sinks: SinkConfig,
}

impl RunConfig {
    pub fn new(xml_url: impl Into<String>) -> Self {
        Self {
            xml_url: xml_url.into(),
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            force: false,
            sinks: SinkConfig::default(),
        }
    }
}

/// Where the written document goes next.
#[derive(Debug, Clone, Default)]
pub struct SinkConfig {
    /// Command template; `{file}` is replaced by the output path.
    pub command: Option<String>,
    pub mode: ExecutionMode,
    pub webhook_url: Option<String>,
    /// JSON object of extra webhook headers.
    pub webhook_headers: Option<String>,
}

#[derive(Debug)]
pub enum FetchOutcome {
    /// A file for this release already exists.
    Skipped { release_date: String },
    Completed(RunResult),
}

#[derive(Debug)]
pub struct RunResult {
    /// URL or file path the XML came from.
    pub source: String,
    pub release_date: Option<String>,
    /// `None` when the document went to stdout.
    pub output_path: Option<PathBuf>,
    pub summary: NormalizationSummary,
    pub rejection_counts: BTreeMap<&'static str, usize>,
    pub sink_failures: Vec<String>,
}

impl RunResult {
    pub fn from_outcome(source: impl Into<String>, outcome: &NormalizationOutcome) -> Self {
        Self {
            source: source.into(),
            release_date: None,
            output_path: None,
            summary: outcome.summary,
            rejection_counts: outcome.rejection_counts(),
            sink_failures: Vec::new(),
        }
    }
}

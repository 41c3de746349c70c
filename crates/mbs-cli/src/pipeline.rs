//! Release pipeline: identify, download, convert, normalize, write, deliver.
//!
//! Each stage runs inside its own span. Rejected items and sink failures are
//! logged as warnings and never abort the run.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use mbs_delivery::{CommandSink, WebhookSink};
use mbs_ingest::{convert_source, has_release, release_date_from_link};
use mbs_model::{ITEMS_COLLECTION, mbs_schema};
use mbs_normalization::{NormalizationOutcome, normalize_document};
use mbs_output::write_release_output;

use crate::types::{FetchOutcome, RunConfig, RunResult, SinkConfig};

/// Convert MBS XML and normalize its items.
pub fn normalize_source(xml: &[u8]) -> Result<NormalizationOutcome> {
    let span = info_span!("normalize", bytes = xml.len());
    let _guard = span.enter();
    let start = Instant::now();

    let document = convert_source(xml).context("convert MBS XML")?;
    let outcome = normalize_document(&document, ITEMS_COLLECTION, mbs_schema())
        .context("normalize MBS items")?;

    for rejection in &outcome.rejections {
        warn!(
            index = rejection.index,
            reason = rejection.reason.label(),
            field = rejection.reason.field().unwrap_or("-"),
            "skipping item: {}",
            rejection.reason
        );
    }
    info!(
        total = outcome.summary.total_records,
        valid = outcome.summary.valid_records,
        rejected = outcome.summary.rejected_records,
        fields = outcome.summary.field_count,
        duration_ms = start.elapsed().as_millis(),
        "normalization complete"
    );
    Ok(outcome)
}

/// Run one release end to end, using `fetch` to download the XML.
///
/// The release is skipped when a file carrying its date already exists in
/// the download directory, unless `config.force` is set.
pub fn run_release<F>(config: &RunConfig, fetch: F) -> Result<FetchOutcome>
where
    F: FnOnce(&str) -> mbs_ingest::Result<Vec<u8>>,
{
    let release_date = release_date_from_link(&config.xml_url)
        .context("identify release date")?;
    let span = info_span!("release", release_date = %release_date);
    let _guard = span.enter();

    if !config.force
        && has_release(&config.download_dir, &release_date)
            .context("check download directory")?
    {
        info!(
            download_dir = %config.download_dir.display(),
            "release already downloaded, skipping"
        );
        return Ok(FetchOutcome::Skipped { release_date });
    }

    let xml = {
        let _download = info_span!("download", url = %config.xml_url).entered();
        let start = Instant::now();
        let xml = fetch(&config.xml_url)
            .with_context(|| format!("download {}", config.xml_url))?;
        info!(
            bytes = xml.len(),
            duration_ms = start.elapsed().as_millis(),
            "downloaded release"
        );
        xml
    };

    let outcome = normalize_source(&xml)?;
    let output_path =
        write_release_output(&config.download_dir, &release_date, &outcome.record_set)?;
    let sink_failures = deliver(&output_path, &config.sinks);

    let mut result = RunResult::from_outcome(config.xml_url.clone(), &outcome);
    result.release_date = Some(release_date);
    result.output_path = Some(output_path);
    result.sink_failures = sink_failures;
    Ok(FetchOutcome::Completed(result))
}

/// Hand the written document to the configured sinks, command first.
///
/// Returns a message per failed sink.
pub fn deliver(path: &Path, sinks: &SinkConfig) -> Vec<String> {
    let span = info_span!("deliver", path = %path.display());
    let _guard = span.enter();
    let mut failures = Vec::new();

    if let Some(template) = &sinks.command {
        if let Err(error) = CommandSink::new(template.clone(), sinks.mode).run(path) {
            warn!(%error, "command execution failed");
            failures.push(format!("command: {error}"));
        }
    }

    if let Some(url) = &sinks.webhook_url {
        let sent = WebhookSink::with_header_json(url.clone(), sinks.webhook_headers.as_deref())
            .and_then(|sink| sink.send(path));
        if let Err(error) = sent {
            warn!(%error, "webhook failed");
            failures.push(format!("webhook: {error}"));
        }
    }

    failures
}

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info_span;

use mbs_cli::pipeline::{normalize_source, run_release};
use mbs_cli::types::{FetchOutcome, RunConfig, RunResult, SinkConfig};
use mbs_delivery::ExecutionMode;
use mbs_ingest::{fetch_xml, read_xml_file};
use mbs_model::mbs_schema;
use mbs_output::{render_record_set, write_record_set};

use crate::cli::{ConvertArgs, FetchArgs};
use crate::summary::schema_table;

pub fn run_fields() -> Result<()> {
    let schema = mbs_schema();
    println!("{}", schema_table(schema));
    println!(
        "{} fields, {} required",
        schema.len(),
        schema.required_fields().count()
    );
    Ok(())
}

pub fn run_fetch(args: &FetchArgs) -> Result<FetchOutcome> {
    let config = run_config_from_args(args);
    run_release(&config, fetch_xml)
}

pub fn run_convert(args: &ConvertArgs) -> Result<RunResult> {
    let span = info_span!("convert", path = %args.xml.display());
    let _guard = span.enter();

    let xml = read_xml_file(&args.xml).context("read MBS XML")?;
    let outcome = normalize_source(&xml)?;
    let mut result = RunResult::from_outcome(args.xml.display().to_string(), &outcome);

    match &args.output {
        Some(path) => {
            write_record_set(path, &outcome.record_set)?;
            result.output_path = Some(path.clone());
        }
        None => {
            let rendered = render_record_set(&outcome.record_set)?;
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .context("write JSON to stdout")?;
        }
    }
    Ok(result)
}

fn run_config_from_args(args: &FetchArgs) -> RunConfig {
    RunConfig {
        xml_url: args.xml_url.clone(),
        download_dir: args.download_dir.clone(),
        force: args.force,
        sinks: SinkConfig {
            command: args.exec.clone(),
            mode: if args.sync {
                ExecutionMode::Sync
            } else {
                ExecutionMode::Background
            },
            webhook_url: args.webhook.clone(),
            webhook_headers: args.webhook_headers.clone(),
        },
    }
}

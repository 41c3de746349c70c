//! CLI argument definitions for the MBS converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use mbs_cli::types::DEFAULT_DOWNLOAD_DIR;

#[derive(Parser)]
#[command(
    name = "mbs",
    version,
    about = "MBS XML to JSON converter - Normalize Medicare Benefits Schedule releases",
    long_about = "Download a Medicare Benefits Schedule XML release and convert it to\n\
                  schema-typed JSON.\n\n\
                  Every item carries the full set of fields; items without an item\n\
                  number or description are skipped and reported."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download a release, normalize it, and deliver the JSON file.
    Fetch(FetchArgs),

    /// Convert a local MBS XML file.
    Convert(ConvertArgs),

    /// List the built-in field schema.
    Fields,
}

#[derive(Parser)]
pub struct FetchArgs {
    /// URL of the MBS XML file (e.g. https://.../MBS-XML-20240301.XML).
    #[arg(long = "xml-url", value_name = "URL")]
    pub xml_url: String,

    /// Directory for downloaded releases.
    #[arg(long = "download-dir", value_name = "DIR", default_value = DEFAULT_DOWNLOAD_DIR)]
    pub download_dir: PathBuf,

    /// Process the release even if it was already downloaded.
    #[arg(long = "force")]
    pub force: bool,

    /// Command to run on the new JSON file. Use {file} as placeholder for its path.
    #[arg(long = "exec", value_name = "CMD")]
    pub exec: Option<String>,

    /// Wait for the --exec command instead of running it in the background.
    #[arg(long = "sync", requires = "exec")]
    pub sync: bool,

    /// URL to POST the new JSON file to.
    #[arg(long = "webhook", value_name = "URL")]
    pub webhook: Option<String>,

    /// JSON object of headers for the webhook request
    /// (e.g. '{"Authorization":"Bearer token"}').
    #[arg(long = "webhook-headers", value_name = "JSON", requires = "webhook")]
    pub webhook_headers: Option<String>,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the MBS XML file.
    #[arg(value_name = "XML")]
    pub xml: PathBuf,

    /// Output JSON path (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

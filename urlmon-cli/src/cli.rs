use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{
    parse_timeout, DEFAULT_INPUT, DEFAULT_LOG_LEVEL, DEFAULT_REPORT, DEFAULT_TIMEOUT_SECS,
};

#[derive(Parser, Debug)]
#[command(name = "url-monitor", about = "Check HTTP(S) endpoints and write a Markdown report")]
pub struct Args {
    /// Path to input file, one URL per line
    #[arg(long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Path to the Markdown report
    #[arg(long, default_value = DEFAULT_REPORT)]
    pub out: PathBuf,

    /// If set, write report.md and results.json into this directory instead of --out
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value = DEFAULT_TIMEOUT_SECS, value_parser = parse_timeout)]
    pub timeout: Duration,

    /// Fail fast on invalid input URLs
    #[arg(long)]
    pub strict: bool,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: tracing::Level,
}

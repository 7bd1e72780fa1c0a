use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use urlmon_client::{Checker, CheckerConfig};
use urlmon_common::{summarize, CheckResult, Result, Summary};

use crate::input::{load_urls, LoadedUrls};
use crate::report::{render_report, Clock, ReportInput, SystemClock};

/// Knobs for a single monitor run.
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    pub timeout: Duration,
    /// Abort on the first invalid input line instead of reporting it.
    pub strict: bool,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            timeout: urlmon_client::DEFAULT_TIMEOUT,
            strict: false,
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct MonitorRun {
    pub results: Vec<CheckResult>,
    pub summary: Summary,
    pub report: String,
    pub invalids: Vec<String>,
}

/// Load `urls_path`, check every URL, summarize and render the report.
///
/// Returns `Err` only when the input cannot be read or, in strict mode,
/// contains an invalid line; in both cases no request has been sent.
pub async fn run_monitor(urls_path: &Path, options: &MonitorOptions) -> Result<MonitorRun> {
    let loaded = load_urls(urls_path, options.strict)?;
    let checker = Checker::new(CheckerConfig {
        timeout: options.timeout,
        ..CheckerConfig::default()
    })?;
    let source = urls_path.display().to_string();
    Ok(run_checks(&source, loaded, &checker, &SystemClock).await)
}

/// Check already-loaded URLs and build the run output.
pub async fn run_checks(
    source: &str,
    loaded: LoadedUrls,
    checker: &Checker,
    clock: &dyn Clock,
) -> MonitorRun {
    let LoadedUrls { urls, invalids } = loaded;
    for msg in &invalids {
        warn!("{msg}");
    }
    info!(source, count = urls.len(), "running checks");

    let results = checker.check_all(&urls).await;
    let summary = summarize(&results);
    info!(
        total = summary.total,
        ok = summary.ok,
        fail = summary.fail,
        "checks finished"
    );

    let report = render_report(
        &ReportInput {
            source,
            summary: &summary,
            results: &results,
            invalids: &invalids,
        },
        clock,
    );

    MonitorRun {
        results,
        summary,
        report,
        invalids,
    }
}

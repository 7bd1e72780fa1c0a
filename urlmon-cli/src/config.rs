use std::time::Duration;

/// URL list read when `--input` is not given.
pub const DEFAULT_INPUT: &str = "urls.txt";

/// Report path written when neither `--out` nor `--out-dir` is given.
pub const DEFAULT_REPORT: &str = "report.md";

/// Per-request timeout in seconds, as accepted by [`parse_timeout`].
pub const DEFAULT_TIMEOUT_SECS: &str = "5.0";

/// Default tracing level; `RUST_LOG` overrides it.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// File names used inside `--out-dir`.
pub const REPORT_FILE_NAME: &str = "report.md";
pub const RESULTS_FILE_NAME: &str = "results.json";

/// Maximum rows in the report's HTTP-failures table.
pub const HTTP_FAILURE_ROWS: usize = 10;

/// Parse a `--timeout` value in (possibly fractional) seconds.
pub fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid timeout {s:?}: expected a number of seconds"))?;
    if !(secs.is_finite() && secs > 0.0) {
        return Err(format!("invalid timeout {s:?}: must be greater than zero"));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid timeout {s:?}: {e}"))
}

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use urlmon_common::{CheckResult, Summary};

use crate::config::HTTP_FAILURE_ROWS;

pub const TITLE: &str = "# URL Monitor Report";

/// Section headers, in the order they appear in every report.
pub const SECTION_HEADERS: [&str; 6] = [
    "## Summary",
    "## Status breakdown",
    "## Slowest URLs (top 5)",
    "## HTTP failures (non-OK status)",
    "## Exceptions",
    "## Invalid input lines",
];

/// Abstraction over current time for testability.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Everything the report is rendered from.
pub struct ReportInput<'a> {
    pub source: &'a str,
    pub summary: &'a Summary,
    pub results: &'a [CheckResult],
    pub invalids: &'a [String],
}

pub fn fmt_ms(value: Option<f64>) -> String {
    match value {
        Some(ms) => format!("{ms:.1} ms"),
        None => "n/a".to_string(),
    }
}

pub fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(ratio) => format!("{:.1}%", ratio * 100.0),
        None => "n/a".to_string(),
    }
}

/// Escape `|` so user text cannot break a Markdown table row.
pub fn md_escape(text: &str) -> String {
    text.replace('|', "\\|")
}

fn fmt_status(status: Option<u16>) -> String {
    status.map_or_else(|| "n/a".to_string(), |s| s.to_string())
}

/// Render the Markdown report. Every section header is always emitted; empty
/// lists render as `- (none)`.
pub fn render_report(input: &ReportInput<'_>, clock: &dyn Clock) -> String {
    let s = input.summary;
    let generated = clock.now_utc().format("%Y-%m-%d %H:%M:%SZ");

    let mut lines: Vec<String> = vec![
        TITLE.to_string(),
        String::new(),
        format!("- Generated (UTC): {generated}"),
        format!("- Source: `{}`", md_escape(input.source)),
        String::new(),
    ];

    // --- Summary ---
    lines.push(SECTION_HEADERS[0].to_string());
    lines.extend([
        format!("- Total checks: **{}**", s.total),
        format!("- OK: **{}**", s.ok),
        format!("- FAIL: **{}**", s.fail),
        format!("  - HTTP failures (non-OK status): **{}**", s.http_failures),
        format!("  - Exceptions: **{}**", s.exceptions),
        format!("- Error rate: **{}**", fmt_pct(Some(s.error_rate))),
        format!("- Success samples (latency): **{}**", s.success.samples),
        format!("- Max latency (success): **{}**", fmt_ms(s.success.max_ms)),
        format!("- Average latency (success): **{}**", fmt_ms(s.success.avg_ms)),
        format!("- p95 latency (success): **{}**", fmt_ms(s.success.p95_ms)),
        format!("- Failure samples (latency): **{}**", s.failure.samples),
        format!("- Average latency (failure): **{}**", fmt_ms(s.failure.avg_ms)),
        format!("- p95 latency (failure): **{}**", fmt_ms(s.failure.p95_ms)),
        String::new(),
    ]);

    // --- Status breakdown ---
    lines.push(SECTION_HEADERS[1].to_string());
    lines.push("| Class | Count |".to_string());
    lines.push("|---|---:|".to_string());
    for (class, count) in s.by_status_class.iter() {
        lines.push(format!("| {class} | {count} |"));
    }
    lines.push(String::new());

    // --- Slowest ---
    lines.push(SECTION_HEADERS[2].to_string());
    lines.push("| URL | Status | Elapsed |".to_string());
    lines.push("|---|---:|---:|".to_string());
    for entry in &s.slowest {
        lines.push(format!(
            "| `{}` | {} | {} |",
            md_escape(&entry.url),
            fmt_status(entry.status),
            fmt_ms(Some(entry.elapsed_ms)),
        ));
    }
    lines.push(String::new());

    // --- HTTP failures ---
    lines.push(SECTION_HEADERS[3].to_string());
    let failures = http_failure_rows(input.results, HTTP_FAILURE_ROWS);
    if failures.is_empty() {
        lines.push("- (none)".to_string());
    } else {
        lines.push("| URL | Status | Elapsed |".to_string());
        lines.push("|---|---:|---:|".to_string());
        for r in failures {
            lines.push(format!(
                "| `{}` | {} | {} |",
                md_escape(r.url()),
                fmt_status(r.status_code()),
                fmt_ms(r.elapsed_ms()),
            ));
        }
    }
    lines.push(String::new());

    // --- Exceptions ---
    lines.push(SECTION_HEADERS[4].to_string());
    let mut any_exception = false;
    for r in input.results {
        if let Some(error) = r.error() {
            any_exception = true;
            lines.push(format!("- `{}`: **{}**", md_escape(r.url()), md_escape(error)));
        }
    }
    if !any_exception {
        lines.push("- (none)".to_string());
    }
    lines.push(String::new());

    // --- Invalid input lines ---
    lines.push(SECTION_HEADERS[5].to_string());
    if input.invalids.is_empty() {
        lines.push("- (none)".to_string());
    } else {
        for msg in input.invalids {
            lines.push(format!("- {}", md_escape(msg)));
        }
    }
    lines.push(String::new());

    lines.join("\n")
}

/// HTTP failures for the report table: slowest first with untimed rows
/// last, one row per URL, at most `limit` rows.
pub fn http_failure_rows(results: &[CheckResult], limit: usize) -> Vec<&CheckResult> {
    let mut timed: Vec<&CheckResult> = results
        .iter()
        .filter(|r| r.is_http_failure() && r.elapsed_ms().is_some())
        .collect();
    timed.sort_by(|a, b| {
        let (a, b) = (a.elapsed_ms().unwrap_or_default(), b.elapsed_ms().unwrap_or_default());
        b.total_cmp(&a)
    });
    let untimed = results
        .iter()
        .filter(|r| r.is_http_failure() && r.elapsed_ms().is_none());

    let mut seen = HashSet::new();
    timed
        .into_iter()
        .chain(untimed)
        .filter(|&r| seen.insert(r.url()))
        .take(limit)
        .collect()
}

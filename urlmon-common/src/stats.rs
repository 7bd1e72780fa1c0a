use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classify::StatusClass;
use crate::model::{CheckResult, Outcome};

/// Below this many samples `p95` is undefined.
pub const P95_MIN_SAMPLES: usize = 20;

/// Number of equal groups the p95 cut is taken from (each group is 5%).
pub const P95_QUANTILE_GROUPS: usize = 20;

/// Length of the `slowest` ranking.
pub const SLOWEST_LIMIT: usize = 5;

/// Aggregate view of one run's check results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub ok: usize,
    pub fail: usize,
    pub http_failures: usize,
    pub exceptions: usize,
    /// `fail / total`, or exactly `0.0` when there are no results.
    pub error_rate: f64,
    pub by_status_class: StatusBreakdown,
    #[serde(flatten)]
    pub success: SuccessLatency,
    #[serde(flatten)]
    pub failure: FailureLatency,
    pub slowest: Vec<SlowEntry>,
}

/// Latency of successful checks that have a timing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccessLatency {
    #[serde(rename = "success_samples")]
    pub samples: usize,
    #[serde(rename = "success_max_ms")]
    pub max_ms: Option<f64>,
    #[serde(rename = "success_avg_ms")]
    pub avg_ms: Option<f64>,
    #[serde(rename = "success_p95_ms")]
    pub p95_ms: Option<f64>,
}

/// Latency of failed checks (HTTP failures and transport failures alike).
/// No maximum is tracked here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureLatency {
    #[serde(rename = "failure_samples")]
    pub samples: usize,
    #[serde(rename = "failure_avg_ms")]
    pub avg_ms: Option<f64>,
    #[serde(rename = "failure_p95_ms")]
    pub p95_ms: Option<f64>,
}

/// One row of the slowest-URLs ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlowEntry {
    pub url: String,
    pub elapsed_ms: f64,
    pub status: Option<u16>,
}

/// Per-class result counts. Every class is always present, zero or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusBreakdown(BTreeMap<StatusClass, usize>);

impl Default for StatusBreakdown {
    fn default() -> Self {
        Self(StatusClass::ALL.iter().map(|c| (*c, 0)).collect())
    }
}

impl StatusBreakdown {
    pub fn get(&self, class: StatusClass) -> usize {
        self.0.get(&class).copied().unwrap_or(0)
    }

    fn record(&mut self, class: StatusClass) {
        *self.0.entry(class).or_insert(0) += 1;
    }

    /// Counts in report row order (2xx, 3xx, 4xx, 5xx, other).
    pub fn iter(&self) -> impl Iterator<Item = (StatusClass, usize)> + '_ {
        StatusClass::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}

/// Summarize a finished run. Pure and total: an empty slice gives zero counts
/// and `None` for every latency statistic.
pub fn summarize(results: &[CheckResult]) -> Summary {
    let total = results.len();
    let ok = results.iter().filter(|r| r.ok()).count();
    let fail = total - ok;

    let http_failures = results
        .iter()
        .filter(|r| matches!(r.outcome(), Outcome::HttpFailure { .. }))
        .count();
    let exceptions = results
        .iter()
        .filter(|r| matches!(r.outcome(), Outcome::TransportFailure { .. }))
        .count();

    let mut by_status_class = StatusBreakdown::default();
    for r in results {
        by_status_class.record(r.status_class());
    }

    let success_ms: Vec<f64> = results
        .iter()
        .filter(|r| r.ok())
        .filter_map(CheckResult::elapsed_ms)
        .collect();
    let failure_ms: Vec<f64> = results
        .iter()
        .filter(|r| !r.ok())
        .filter_map(CheckResult::elapsed_ms)
        .collect();

    let error_rate = if total > 0 { fail as f64 / total as f64 } else { 0.0 };

    Summary {
        total,
        ok,
        fail,
        http_failures,
        exceptions,
        error_rate,
        by_status_class,
        success: SuccessLatency {
            samples: success_ms.len(),
            max_ms: success_ms.iter().copied().reduce(f64::max),
            avg_ms: mean(&success_ms),
            p95_ms: p95(&success_ms),
        },
        failure: FailureLatency {
            samples: failure_ms.len(),
            avg_ms: mean(&failure_ms),
            p95_ms: p95(&failure_ms),
        },
        slowest: slowest(results, SLOWEST_LIMIT),
    }
}

/// Top `limit` results by elapsed time, descending. Results without a timing
/// are skipped; equal timings keep their input order.
fn slowest(results: &[CheckResult], limit: usize) -> Vec<SlowEntry> {
    let mut timed: Vec<(&CheckResult, f64)> = results
        .iter()
        .filter_map(|r| r.elapsed_ms().map(|ms| (r, ms)))
        .collect();
    // `sort_by` is stable.
    timed.sort_by(|a, b| b.1.total_cmp(&a.1));

    timed
        .into_iter()
        .take(limit)
        .map(|(r, elapsed_ms)| SlowEntry {
            url: r.url().to_string(),
            elapsed_ms,
            status: r.status_code(),
        })
        .collect()
}

fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// 95th percentile of `samples`, or `None` with fewer than
/// [`P95_MIN_SAMPLES`] values. This is the last cut point of
/// [`quantiles_inclusive`] with 20 groups.
pub fn p95(samples: &[f64]) -> Option<f64> {
    if samples.len() < P95_MIN_SAMPLES {
        return None;
    }
    quantiles_inclusive(samples, P95_QUANTILE_GROUPS).and_then(|cuts| cuts.last().copied())
}

/// Split `samples` into `groups` equal-probability intervals and return the
/// `groups - 1` cut points, treating the minimum and maximum as the 0th and
/// 100th percentiles.
///
/// For cut `i` with `m = len - 1`, the position is `i * m / groups`; the
/// integer part `j` and remainder `delta` interpolate between the sorted
/// neighbours as `(d[j] * (groups - delta) + d[j + 1] * delta) / groups`.
/// Working on integer ranks keeps results exact where the data allows it
/// (`1.0..=20.0` with 20 groups gives `19.05` for the last cut).
///
/// Returns `None` with fewer than two samples or zero groups. The input is not
/// reordered.
pub fn quantiles_inclusive(samples: &[f64], groups: usize) -> Option<Vec<f64>> {
    if samples.len() < 2 || groups == 0 {
        return None;
    }

    let mut data = samples.to_vec();
    data.sort_by(f64::total_cmp);

    let m = data.len() - 1;
    let cuts = (1..groups)
        .map(|i| {
            let j = i * m / groups;
            let delta = i * m - j * groups;
            (data[j] * (groups - delta) as f64 + data[j + 1] * delta as f64) / groups as f64
        })
        .collect();
    Some(cuts)
}

use urlmon_common::{p95, quantiles_inclusive, summarize, CheckResult, StatusClass};

fn ok(url: &str, ms: f64) -> CheckResult {
    CheckResult::from_status(url, 200, Some(ms))
}

fn scenario() -> Vec<CheckResult> {
    vec![
        CheckResult::from_status("https://a", 200, Some(10.0)),
        CheckResult::from_status("https://b", 404, Some(20.0)),
        CheckResult::transport_failure("https://c", "Timeout", Some(5.0)),
    ]
}

// --- p95 ---

#[test]
fn test_p95_undefined_below_twenty_samples() {
    for n in 0..20 {
        let samples: Vec<f64> = (1..=n).map(f64::from).collect();
        assert_eq!(p95(&samples), None, "n={n}");
    }
}

#[test]
fn test_p95_one_to_twenty() {
    let samples: Vec<f64> = (1..=20).map(f64::from).collect();
    let value = p95(&samples).expect("p95 defined for 20 samples");
    assert!((value - 19.05).abs() < 1e-9, "got {value}");
}

#[test]
fn test_p95_unsorted_input_is_not_mutated() {
    let samples: Vec<f64> = (1..=20).rev().map(f64::from).collect();
    let before = samples.clone();
    let value = p95(&samples).unwrap();
    assert!((value - 19.05).abs() < 1e-9);
    assert_eq!(samples, before);
}

#[test]
fn test_p95_interpolates_at_rank_n_minus_one_times_095() {
    // n=21: rank = 20 * 0.95 = 19 exactly, no interpolation.
    let samples: Vec<f64> = (0..21).map(|i| f64::from(i) * 10.0).collect();
    assert_eq!(p95(&samples), Some(190.0));

    // n=40 of equal values collapses to that value.
    assert_eq!(p95(&[3.5; 40]), Some(3.5));
}

#[test]
fn test_quantiles_inclusive_quartiles() {
    // Four groups over 1..=9 gives the textbook inclusive quartiles.
    let samples: Vec<f64> = (1..=9).map(f64::from).collect();
    assert_eq!(quantiles_inclusive(&samples, 4), Some(vec![3.0, 5.0, 7.0]));

    let samples = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(quantiles_inclusive(&samples, 4), Some(vec![1.75, 2.5, 3.25]));
}

#[test]
fn test_quantiles_inclusive_degenerate_inputs() {
    assert_eq!(quantiles_inclusive(&[], 20), None);
    assert_eq!(quantiles_inclusive(&[1.0], 20), None);
    assert_eq!(quantiles_inclusive(&[1.0, 2.0], 0), None);
    assert_eq!(quantiles_inclusive(&[1.0, 2.0], 1), Some(vec![]));
}

// --- summarize ---

#[test]
fn test_summarize_counts_scenario() {
    let s = summarize(&scenario());
    assert_eq!(s.total, 3);
    assert_eq!(s.ok, 1);
    assert_eq!(s.fail, 2);
    assert_eq!(s.http_failures, 1);
    assert_eq!(s.exceptions, 1);
    assert_eq!(s.by_status_class.get(StatusClass::Success), 1);
    assert_eq!(s.by_status_class.get(StatusClass::ClientError), 1);
    assert_eq!(s.by_status_class.get(StatusClass::Other), 1);
    assert_eq!(s.by_status_class.get(StatusClass::Redirection), 0);
    assert_eq!(s.by_status_class.get(StatusClass::ServerError), 0);
    assert!((s.error_rate - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_summarize_latency_split() {
    let s = summarize(&scenario());

    assert_eq!(s.success.samples, 1);
    assert_eq!(s.success.max_ms, Some(10.0));
    assert_eq!(s.success.avg_ms, Some(10.0));
    assert_eq!(s.success.p95_ms, None);

    // HTTP failures and transport failures both feed the failure samples.
    assert_eq!(s.failure.samples, 2);
    assert_eq!(s.failure.avg_ms, Some(12.5));
    assert_eq!(s.failure.p95_ms, None);
}

#[test]
fn test_summarize_empty() {
    let s = summarize(&[]);
    assert_eq!((s.total, s.ok, s.fail), (0, 0, 0));
    assert_eq!((s.http_failures, s.exceptions), (0, 0));
    assert_eq!(s.error_rate, 0.0);
    assert_eq!(s.success.samples, 0);
    assert_eq!(s.success.max_ms, None);
    assert_eq!(s.success.avg_ms, None);
    assert_eq!(s.success.p95_ms, None);
    assert_eq!(s.failure.samples, 0);
    assert_eq!(s.failure.avg_ms, None);
    assert_eq!(s.failure.p95_ms, None);
    for (_, count) in s.by_status_class.iter() {
        assert_eq!(count, 0);
    }
    assert_eq!(s.by_status_class.iter().count(), 5);
    assert!(s.slowest.is_empty());
}

#[test]
fn test_summarize_twenty_successes() {
    let results: Vec<CheckResult> = (1..=20)
        .map(|i| ok(&format!("https://x{i}.test"), f64::from(i)))
        .collect();
    let s = summarize(&results);
    assert_eq!(s.success.samples, 20);
    assert_eq!(s.success.max_ms, Some(20.0));
    assert_eq!(s.success.avg_ms, Some(10.5));
    let p = s.success.p95_ms.expect("p95 defined");
    assert!((p - 19.05).abs() < 1e-9);
    assert_eq!(s.error_rate, 0.0);
}

#[test]
fn test_summarize_failure_p95() {
    let results: Vec<CheckResult> = (1..=20)
        .map(|i| CheckResult::from_status(format!("https://f{i}"), 500, Some(f64::from(i))))
        .collect();
    let s = summarize(&results);
    assert_eq!(s.failure.samples, 20);
    assert!((s.failure.p95_ms.unwrap() - 19.05).abs() < 1e-9);
    assert_eq!(s.success.p95_ms, None);
    assert_eq!(s.error_rate, 1.0);
}

#[test]
fn test_failure_counts_partition_fail() {
    let mut results = scenario();
    results.push(CheckResult::from_status("https://d", 503, None));
    results.push(CheckResult::transport_failure("https://e", "ConnectError: refused", None));
    results.push(CheckResult::from_status("https://f", 302, Some(1.0)));
    let s = summarize(&results);
    assert_eq!(s.http_failures + s.exceptions, s.fail);
    assert_eq!(s.ok + s.fail, s.total);
}

#[test]
fn test_samples_skip_missing_elapsed() {
    let results = vec![
        CheckResult::from_status("https://a", 200, None),
        CheckResult::from_status("https://b", 200, Some(4.0)),
        CheckResult::transport_failure("https://c", "boom", None),
    ];
    let s = summarize(&results);
    assert_eq!(s.success.samples, 1);
    assert_eq!(s.failure.samples, 0);
    assert_eq!(s.failure.avg_ms, None);
}

// --- slowest ---

#[test]
fn test_slowest_top_five_descending() {
    let results: Vec<CheckResult> = (1..=8).map(|i| ok(&format!("https://s{i}"), f64::from(i))).collect();
    let s = summarize(&results);
    let urls: Vec<&str> = s.slowest.iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, ["https://s8", "https://s7", "https://s6", "https://s5", "https://s4"]);
    assert_eq!(s.slowest[0].elapsed_ms, 8.0);
    assert_eq!(s.slowest[0].status, Some(200));
}

#[test]
fn test_slowest_ties_keep_input_order() {
    let results = vec![
        ok("https://first", 10.0),
        ok("https://fast", 1.0),
        ok("https://second", 10.0),
        ok("https://third", 10.0),
    ];
    let s = summarize(&results);
    let urls: Vec<&str> = s.slowest.iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, ["https://first", "https://second", "https://third", "https://fast"]);
}

#[test]
fn test_slowest_excludes_missing_elapsed() {
    let results = vec![
        CheckResult::from_status("https://untimed", 200, None),
        CheckResult::transport_failure("https://err", "Timeout", Some(3.0)),
    ];
    let s = summarize(&results);
    assert_eq!(s.slowest.len(), 1);
    assert_eq!(s.slowest[0].url, "https://err");
    assert_eq!(s.slowest[0].status, None);
}

// --- wire format ---

#[test]
fn test_summary_json_field_names() {
    let s = summarize(&scenario());
    let value = serde_json::to_value(&s).unwrap();
    let obj = value.as_object().unwrap();
    for key in [
        "total",
        "ok",
        "fail",
        "http_failures",
        "exceptions",
        "error_rate",
        "by_status_class",
        "success_samples",
        "success_max_ms",
        "success_avg_ms",
        "success_p95_ms",
        "failure_samples",
        "failure_avg_ms",
        "failure_p95_ms",
        "slowest",
    ] {
        assert!(obj.contains_key(key), "missing {key}");
    }
    assert!(!obj.contains_key("failure_max_ms"));
    assert_eq!(value["by_status_class"]["2xx"], 1);
    assert_eq!(value["by_status_class"]["3xx"], 0);
    assert_eq!(value["by_status_class"]["other"], 1);
    assert!(value["success_p95_ms"].is_null());
    assert_eq!(value["slowest"][0]["url"], "https://b");

    let decoded: urlmon_common::Summary = serde_json::from_value(value).unwrap();
    assert_eq!(decoded.by_status_class, s.by_status_class);
    assert_eq!(decoded.success, s.success);
    assert_eq!(decoded.failure, s.failure);
    assert_eq!(decoded.slowest, s.slowest);
}

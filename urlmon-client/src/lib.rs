use std::error::Error as _;
use std::fmt::Write;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use urlmon_common::{CheckResult, Outcome, Result, UrlMonError};

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Checker configuration
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Upper bound for one GET, from connect until the body is read.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("url-monitor/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Issues one GET per URL and turns whatever happens into a [`CheckResult`].
pub struct Checker {
    pub config: CheckerConfig,
    http_client: reqwest::Client,
}

impl Checker {
    /// Create a new checker with the given configuration
    pub fn new(config: CheckerConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| UrlMonError::Client(e.to_string()))?;
        Ok(Self { config, http_client })
    }

    /// Check a single URL. Never fails: transport errors come back as a
    /// [`Outcome::TransportFailure`] with the elapsed time still recorded.
    pub async fn check(&self, url: &str) -> CheckResult {
        debug!(url, "checking");
        let start = Instant::now();
        let fetched = self.fetch(url).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match fetched {
            Ok(status) => CheckResult::from_status(url, status, Some(elapsed_ms)),
            Err(e) => CheckResult::transport_failure(url, describe_error(&e), Some(elapsed_ms)),
        }
    }

    /// Check every URL one after another, keeping input order.
    pub async fn check_all(&self, urls: &[String]) -> Vec<CheckResult> {
        let mut results = Vec::with_capacity(urls.len());
        for url in urls {
            let result = self.check(url).await;
            log_result(&result);
            results.push(result);
        }
        results
    }

    /// GET `url` and drain the body so the timing covers the full response.
    async fn fetch(&self, url: &str) -> reqwest::Result<u16> {
        let response = self.http_client.get(url).send().await?;
        let status = response.status().as_u16();
        response.bytes().await?;
        Ok(status)
    }
}

fn log_result(result: &CheckResult) {
    let elapsed_ms = result.elapsed_ms().unwrap_or_default();
    match result.outcome() {
        Outcome::Success { status } => {
            info!(url = result.url(), status, elapsed_ms, "check ok");
        }
        Outcome::HttpFailure { status } => {
            warn!(url = result.url(), status, elapsed_ms, "non-2xx status");
        }
        Outcome::TransportFailure { error } => {
            warn!(url = result.url(), error = %error, elapsed_ms, "request failed");
        }
    }
}

/// Short label for the kind of transport failure.
pub fn error_kind(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "Timeout"
    } else if err.is_connect() {
        "ConnectError"
    } else if err.is_redirect() {
        "RedirectError"
    } else if err.is_builder() {
        "InvalidUrl"
    } else if err.is_body() {
        "BodyError"
    } else if err.is_decode() {
        "DecodeError"
    } else {
        "RequestError"
    }
}

/// `"<Kind>: <error>"` followed by each underlying cause.
pub fn describe_error(err: &reqwest::Error) -> String {
    let mut s = format!("{}: {}", error_kind(err), err);
    let mut source = err.source();
    while let Some(src) = source {
        let _ = write!(s, ": {}", src);
        source = src.source();
    }
    s
}

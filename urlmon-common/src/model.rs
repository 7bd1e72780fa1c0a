use serde::{Deserialize, Serialize};

use crate::classify::{classify_status, StatusClass};
use crate::UrlMonError;

/// How a single check ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A response with a 2xx status.
    Success { status: u16 },
    /// A response with any status outside 200..=299.
    HttpFailure { status: u16 },
    /// The request failed before a usable response arrived.
    TransportFailure { error: String },
}

impl Outcome {
    pub fn from_status(status: u16) -> Self {
        if (200..=299).contains(&status) {
            Outcome::Success { status }
        } else {
            Outcome::HttpFailure { status }
        }
    }
}

/// Outcome of checking one endpoint. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "CheckRecord", try_from = "CheckRecord")]
pub struct CheckResult {
    url: String,
    outcome: Outcome,
    elapsed_ms: Option<f64>,
}

impl CheckResult {
    /// A check that received a response; 2xx becomes a success, anything else an HTTP failure.
    pub fn from_status(url: impl Into<String>, status: u16, elapsed_ms: Option<f64>) -> Self {
        Self {
            url: url.into(),
            outcome: Outcome::from_status(status),
            elapsed_ms,
        }
    }

    /// A check that failed before any response was received.
    pub fn transport_failure(
        url: impl Into<String>,
        error: impl Into<String>,
        elapsed_ms: Option<f64>,
    ) -> Self {
        Self {
            url: url.into(),
            outcome: Outcome::TransportFailure { error: error.into() },
            elapsed_ms,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn elapsed_ms(&self) -> Option<f64> {
        self.elapsed_ms
    }

    pub fn ok(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self.outcome {
            Outcome::Success { status } | Outcome::HttpFailure { status } => Some(status),
            Outcome::TransportFailure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::TransportFailure { error } => Some(error),
            _ => None,
        }
    }

    pub fn is_http_failure(&self) -> bool {
        matches!(self.outcome, Outcome::HttpFailure { .. })
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self.outcome, Outcome::TransportFailure { .. })
    }

    pub fn status_class(&self) -> StatusClass {
        classify_status(self.status_code().map(i64::from))
    }
}

/// Flat wire shape of a [`CheckResult`], as written to `results.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckRecord {
    pub url: String,
    pub ok: bool,
    pub status_code: Option<u16>,
    pub elapsed_ms: Option<f64>,
    pub error: Option<String>,
}

impl From<CheckResult> for CheckRecord {
    fn from(r: CheckResult) -> Self {
        let ok = r.ok();
        let status_code = r.status_code();
        let (url, elapsed_ms) = (r.url, r.elapsed_ms);
        let error = match r.outcome {
            Outcome::TransportFailure { error } => Some(error),
            _ => None,
        };
        CheckRecord { url, ok, status_code, elapsed_ms, error }
    }
}

impl TryFrom<CheckRecord> for CheckResult {
    type Error = UrlMonError;

    fn try_from(rec: CheckRecord) -> Result<Self, Self::Error> {
        let inconsistent = |reason: &str| UrlMonError::InconsistentResult {
            url: rec.url.clone(),
            reason: reason.to_string(),
        };

        if let Some(ms) = rec.elapsed_ms {
            if ms.is_nan() || ms < 0.0 {
                return Err(inconsistent("elapsed_ms must be non-negative"));
            }
        }

        let outcome = match (rec.status_code, &rec.error) {
            (Some(_), Some(_)) => return Err(inconsistent("both status_code and error are set")),
            (None, None) => return Err(inconsistent("neither status_code nor error is set")),
            (None, Some(error)) => {
                if rec.ok {
                    return Err(inconsistent("ok is true but error is set"));
                }
                Outcome::TransportFailure { error: error.clone() }
            }
            (Some(status), None) => {
                let outcome = Outcome::from_status(status);
                if rec.ok != matches!(outcome, Outcome::Success { .. }) {
                    return Err(inconsistent("ok does not match status_code"));
                }
                outcome
            }
        };

        Ok(CheckResult {
            url: rec.url,
            outcome,
            elapsed_ms: rec.elapsed_ms,
        })
    }
}

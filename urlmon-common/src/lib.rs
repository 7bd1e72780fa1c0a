use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod classify;
pub mod model;
pub mod stats;

pub use classify::{classify_status, StatusClass};
pub use model::{CheckRecord, CheckResult, Outcome};
pub use stats::{
    p95, quantiles_inclusive, summarize, FailureLatency, SlowEntry, StatusBreakdown,
    SuccessLatency, Summary,
};

/// Error types for url-monitor operations
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrlMonError {
    #[error("{file}:{line}: Invalid URL: '{value}'")]
    InvalidUrl {
        file: String,
        line: usize,
        value: String,
    },

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Inconsistent check result for {url}: {reason}")]
    InconsistentResult { url: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Result type for url-monitor operations
pub type Result<T> = std::result::Result<T, UrlMonError>;

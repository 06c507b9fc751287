//! Error taxonomy shared by the client, aggregator and HTTP layer.

use thiserror::Error;

/// Failures surfaced to the user as an inline message. None are retried.
#[derive(Debug, Error)]
pub enum DashError {
    /// Transport failure or a non-success HTTP status from openFDA.
    #[error("fetch failed{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Fetch {
        status: Option<u16>,
        message: String,
    },

    /// Response body was empty, not JSON, or missing the `results` array.
    #[error("malformed openFDA response: {0}")]
    Parse(String),

    /// Caller passed an unusable argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DashError {
    pub fn fetch(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Fetch {
            status,
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Short machine-readable tag used in JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "fetch_error",
            Self::Parse(_) => "parse_error",
            Self::InvalidArgument(_) => "invalid_argument",
        }
    }
}

impl From<reqwest::Error> for DashError {
    fn from(err: reqwest::Error) -> Self {
        Self::fetch(err.status().map(|s| s.as_u16()), err.to_string())
    }
}

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

pub type DashResult<T> = Result<T, DashError>;

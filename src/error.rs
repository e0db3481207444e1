//! Error taxonomy for the judge pipeline.
//!
//! Completion and extraction failures never reach a caller: the analyzer
//! turns them into fallback records. Only configuration and handler errors
//! escape the core.

use std::time::Duration;

/// Failure of the upstream completion provider.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Network, HTTP or provider-side failure
    #[error("Completion provider unavailable: {0}")]
    Unavailable(String),

    /// The provider did not answer within the configured budget
    #[error("Completion timed out after {0:?}")]
    Timeout(Duration),

    /// The provider answered without any message content
    #[error("Completion provider returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Failure to recover a JSON object from model text.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("No JSON object found in model output")]
    NoJsonObject,

    #[error("Embedded JSON is invalid: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Startup configuration problems. Fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Errors surfaced by a judge request.
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

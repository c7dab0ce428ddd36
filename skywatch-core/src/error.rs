use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single fetch stage.
///
/// The orchestrator treats every variant the same way (log and move on), but
/// keeping the taxonomy lets callers and tests see *which* way a stage failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a usable HTTP response.
    #[error("request to weather provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status (bad city, invalid
    /// key, rate limit). The body is truncated before it lands here.
    #[error("weather provider returned {status}: {body}")]
    Provider { status: StatusCode, body: String },

    /// The response body did not match the expected shape.
    #[error("could not parse weather provider payload: {0}")]
    Payload(#[from] serde_json::Error),
}

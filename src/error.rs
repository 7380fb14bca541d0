//! Error taxonomy for the data and order boundaries.
//!
//! Fetch failures come in four retryable transport classes plus a terminal
//! malformed-payload class; the retryable ones are handled identically by the
//! retry loop but keep distinct diagnostic labels. Order failures are never
//! retried. Indicator warm-up is not an error anywhere: it is an absent value
//! that decision code turns into a no-action outcome.

/// Failure classes for historical data fetches.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("upstream returned status {status}")]
    UpstreamStatus { status: u16 },

    #[error("connection failed: {reason}")]
    ConnectionFailed { reason: String },

    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("transport error: {reason}")]
    Transport { reason: String },

    /// Response body missing required fields or out of order. Terminal:
    /// retrying the same payload cannot help.
    #[error("malformed payload: {reason}")]
    MalformedPayload { reason: String },
}

impl FetchError {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FetchError::MalformedPayload { .. })
    }

    /// Short diagnostic label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            FetchError::UpstreamStatus { .. } => "upstream_status",
            FetchError::ConnectionFailed { .. } => "connection_failed",
            FetchError::Timeout { .. } => "timeout",
            FetchError::Transport { .. } => "transport",
            FetchError::MalformedPayload { .. } => "malformed_payload",
        }
    }
}

/// Failure classes for order submission. Surfaced once; the trade counter is
/// only advanced on success.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("order rejected with status {status}")]
    Rejected { status: u16 },

    #[error("order transport error: {reason}")]
    Transport { reason: String },
}

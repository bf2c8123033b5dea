//! Error types for the rules client

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid server address: {0}")]
    InvalidAddress(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service refused the request (illegal move, stale token, bad input).
    #[error("Rejected by rules service ({status}): {reason}")]
    Rejected { status: u16, reason: String },

    #[error("Rules service error: HTTP {0}")]
    ServerError(u16),

    #[error("Server returned invalid data: {0}")]
    InvalidData(String),

    #[error("Mock response not configured for: {0}")]
    NotConfigured(String),
}

impl ClientError {
    /// True when the service answered and said no, as opposed to the
    /// request never completing or the answer being unusable.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

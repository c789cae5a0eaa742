use thiserror::Error;

/// Failures talking to the processing backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered, but not with 200. 4xx and 5xx are treated alike.
    #[error("server rejected the request with HTTP {status}")]
    Rejected { status: u16 },
    /// No response: connection refused, DNS failure, reset mid-body...
    #[error("couldn't reach the server: {0}")]
    Unreachable(String),
    #[error("couldn't build the request payload: {0}")]
    Payload(String),
}

impl ApiError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::Unreachable(_))
    }

    pub(crate) fn unreachable(err: reqwest::Error) -> Self {
        ApiError::Unreachable(err.to_string())
    }
}

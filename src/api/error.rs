use crate::auth::StoreError;
use crate::validation::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),

    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// No usable session, or the backend rejected it even after a refresh
    #[error("not signed in")]
    Unauthorized,

    /// A response arrived but its body was not the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Rejected before any network call
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("token storage: {0}")]
    Storage(String),
}

impl ApiError {
    /// Read queries are retried on these; everything else fails immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) | ApiError::Malformed(_) => true,
            ApiError::Status { status, .. } => *status >= 500 || *status == 429,
            ApiError::Unauthorized | ApiError::Validation(_) | ApiError::Storage(_) => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Malformed(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("The HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The provider returned HTTP status {0}")]
    Status(u16),

    #[error("The provider returned an error [{code}]: {description}")]
    Provider { code: String, description: String },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(String),

    #[error("The provider returned no prices for the request")]
    NoData,
}

impl ApiError {
    /// Transport failures, throttling and server-side errors may succeed on a
    /// later attempt; everything else will not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Request(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ApiError::Status(code) => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatrixProviderError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Matrix service rejected the request with status {status}: {message}")]
    Status { status: String, message: String },

    #[error("Incomplete response: {0}")]
    IncompleteResponse(String),

    #[error("Location {0} is not part of the custom matrix")]
    UnknownLocation(String),

    #[error("Missing API key for {0}")]
    MissingApiKey(&'static str),

    #[error("Invalid speed {0} km/h, expected a positive number")]
    InvalidSpeed(f64),
}

impl MatrixProviderError {
    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            MatrixProviderError::Request(error) => {
                error.is_timeout() || error.is_connect() || error.is_request()
            }
            MatrixProviderError::Api { status, .. } => *status == 429 || *status >= 500,
            MatrixProviderError::Status { status, .. } => {
                status == "OVER_QUERY_LIMIT" || status == "UNKNOWN_ERROR"
            }
            MatrixProviderError::IncompleteResponse(_)
            | MatrixProviderError::UnknownLocation(_)
            | MatrixProviderError::MissingApiKey(_)
            | MatrixProviderError::InvalidSpeed(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(
            MatrixProviderError::Api {
                status: 503,
                message: String::new()
            }
            .is_retryable()
        );
        assert!(
            MatrixProviderError::Api {
                status: 429,
                message: String::new()
            }
            .is_retryable()
        );
        assert!(
            !MatrixProviderError::Api {
                status: 403,
                message: String::new()
            }
            .is_retryable()
        );
        assert!(
            MatrixProviderError::Status {
                status: "OVER_QUERY_LIMIT".to_string(),
                message: String::new()
            }
            .is_retryable()
        );
        assert!(
            !MatrixProviderError::Status {
                status: "REQUEST_DENIED".to_string(),
                message: String::new()
            }
            .is_retryable()
        );
        assert!(!MatrixProviderError::IncompleteResponse("rows".to_string()).is_retryable());
    }
}

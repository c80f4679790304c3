use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider authentication failed: {0}")]
    Auth(String),

    #[error("Invalid search request: {0}")]
    InvalidRequest(String),

    #[error("Provider request failed with status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Provider unreachable: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider returned an unexpected payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ProviderError {
    /// Whether the caller may usefully retry the same request. The client
    /// itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Network(_) => true,
            ProviderError::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryability() {
        let unavailable = ProviderError::Upstream {
            status: 503,
            message: "service unavailable".to_string(),
        };
        assert!(unavailable.is_retryable());

        let throttled = ProviderError::Upstream {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert!(throttled.is_retryable());

        let bad_request = ProviderError::Upstream {
            status: 400,
            message: "bad request".to_string(),
        };
        assert!(!bad_request.is_retryable());

        assert!(!ProviderError::Auth("denied".to_string()).is_retryable());
        assert!(!ProviderError::InvalidRequest("no origin".to_string()).is_retryable());
    }
}

//! API error types

/// Errors that can occur while talking to the remote catalog.
///
/// Every variant is a transport-level failure: the remote could not be
/// reached, answered with a non-success status, or sent something that
/// does not decode.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The remote answered with a non-2xx status.
    #[error("catalog returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never got an answer (DNS, connect, TLS, timeout).
    #[error("catalog unreachable: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured endpoint is not a URL.
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// The answer was not the JSON shape the remote normally sends.
    #[error("undecodable catalog response: {message}")]
    Parse {
        message: String,
        /// Raw body, kept for logging.
        body: Option<String>,
    },
}

impl ApiError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Parse error without a body.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Parse error that keeps the offending body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Status code of an [`ApiError::Http`].
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether asking again later could plausibly succeed.
    ///
    /// Nothing in this crate retries; callers use this to decide whether
    /// to offer "try again".
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Network(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(ApiError::http(429, "slow down").is_retryable());
        assert!(ApiError::http(503, "unavailable").is_retryable());
        assert!(!ApiError::http(401, "bad key").is_retryable());
        assert!(!ApiError::parse("eof").is_retryable());
    }

    #[test]
    fn test_status_code() {
        assert_eq!(ApiError::http(404, "gone").status_code(), Some(404));
        assert_eq!(ApiError::InvalidUrl("x".into()).status_code(), None);
    }
}

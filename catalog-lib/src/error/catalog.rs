//! Top-level error returned by catalog lookups

use super::ApiError;

/// Message used when the remote reports failure without saying why.
pub const GENERIC_NOT_FOUND: &str = "not found";

/// Errors surfaced to callers of `search` and `details`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remote could not be reached or its answer could not be decoded.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The remote answered, but with its failure sentinel.
    #[error("{message}")]
    NotFound {
        /// Message supplied by the remote, or a generic one.
        message: String,
    },
}

impl Error {
    /// Creates a not-found error, falling back to a generic message.
    pub fn not_found(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_NOT_FOUND.to_string());
        Self::NotFound { message }
    }

    /// Returns `true` if the remote reported that nothing matched.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

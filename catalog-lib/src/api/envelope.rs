//! Decoding of the remote's response envelope.
//!
//! The remote marks success with `"Response": "True"` and anything else
//! (including a missing field, `"true"` or a JSON `true`) is a failure
//! that may carry an `"Error"` message. The sentinel is inspected here
//! and nowhere else.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::error::Error;
use crate::model::Details;
use crate::model::Item;
use crate::model::SearchPage;

/// Exact value of the `Response` field that marks success.
pub const SUCCESS_SENTINEL: &str = "True";

/// A decoded remote answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    /// The remote found what was asked for.
    Success(T),
    /// The remote answered with its failure sentinel.
    Failure {
        /// The remote's `Error` message, if it sent one.
        message: Option<String>,
    },
}

impl<T> Envelope<T> {
    /// Returns `true` for [`Envelope::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Converts a failure into [`Error::NotFound`].
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure { message } => Err(Error::not_found(message)),
        }
    }

    /// Returns the success value, if any.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure { .. } => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Sentinel {
    #[serde(rename = "Response", default)]
    response: Value,
    #[serde(rename = "Error", default)]
    error: Value,
}

impl Sentinel {
    fn is_success(&self) -> bool {
        self.response.as_str() == Some(SUCCESS_SENTINEL)
    }

    fn message(&self) -> Option<String> {
        self.error.as_str().map(str::to_string)
    }
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(rename = "Search", default)]
    search: Vec<Item>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
}

fn parse_error(err: serde_json::Error, body: &[u8]) -> ApiError {
    ApiError::parse_with_body(err.to_string(), String::from_utf8_lossy(body))
}

fn decode_sentinel(body: &[u8]) -> Result<Sentinel, ApiError> {
    serde_json::from_slice(body).map_err(|e| parse_error(e, body))
}

/// Decodes a search (or suggest) body as page `page`.
pub fn decode_search(body: &[u8], page: u32) -> Result<Envelope<SearchPage>, ApiError> {
    let sentinel = decode_sentinel(body)?;
    if !sentinel.is_success() {
        return Ok(Envelope::Failure {
            message: sentinel.message(),
        });
    }

    let parsed: SearchBody = serde_json::from_slice(body).map_err(|e| parse_error(e, body))?;
    let total_count = match parsed.total_results {
        Some(total) => total.trim().parse::<usize>().map_err(|e| {
            ApiError::parse_with_body(
                format!("invalid totalResults {:?}: {}", total, e),
                String::from_utf8_lossy(body),
            )
        })?,
        None => parsed.search.len(),
    };

    Ok(Envelope::Success(SearchPage::new(parsed.search, total_count, page)))
}

/// Decodes a details body.
pub fn decode_details(body: &[u8]) -> Result<Envelope<Details>, ApiError> {
    let sentinel = decode_sentinel(body)?;
    if !sentinel.is_success() {
        return Ok(Envelope::Failure {
            message: sentinel.message(),
        });
    }

    let mut details: Details = serde_json::from_slice(body).map_err(|e| parse_error(e, body))?;
    details.extra.remove("Response");
    details.extra.remove("Error");
    Ok(Envelope::Success(details))
}

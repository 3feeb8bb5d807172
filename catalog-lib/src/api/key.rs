//! Request kinds and cache keys.

use std::fmt;

/// The three kinds of remote lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Search,
    Details,
    Suggest,
}

impl RequestKind {
    /// Returns the name used as the cache key prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Details => "details",
            Self::Suggest => "suggest",
        }
    }

    /// Returns `true` if failure envelopes of this kind are cached too.
    ///
    /// Suggestions cache "nothing found" so that a prefix known to match
    /// nothing is not asked again until its TTL runs out.
    pub fn caches_failures(&self) -> bool {
        matches!(self, Self::Suggest)
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical cache key for a request.
///
/// Parameters are sorted by name, so the same request built with a
/// different parameter order maps to the same key. Values are
/// percent-encoded so a value containing `&` or `=` cannot collide with
/// a different parameter split.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Builds the key for `kind` with the given parameters.
    pub fn new(kind: RequestKind, params: &[(&str, String)]) -> Self {
        let mut sorted: Vec<&(&str, String)> = params.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(&b.1)));

        let query = sorted
            .iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        Self(format!("{}?{}", kind.as_str(), query))
    }

    /// Returns the key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

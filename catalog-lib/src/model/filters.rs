//! Search filters

use serde::Deserialize;
use serde::Serialize;

use super::ItemKind;

/// Optional narrowing of a search by year and kind.
///
/// An empty year means "no year filter", the same as not setting one, so
/// the two produce identical requests and share a cache entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchFilters {
    pub year: Option<String>,
    pub kind: Option<ItemKind>,
}

impl SearchFilters {
    /// Creates filters that match everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds filters from raw form values, treating empty strings as unset.
    pub fn from_raw(year: &str, kind: &str) -> Self {
        Self::new().with_year(year).with_kind(ItemKind::parse(kind))
    }

    /// Sets the year filter. Blank values clear it.
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        let year = year.into();
        let trimmed = year.trim();
        self.year = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Sets or clears the kind filter.
    pub fn with_kind(mut self, kind: impl Into<Option<ItemKind>>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Returns `true` if no filter is set.
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.kind.is_none()
    }

    /// Appends the set filters as request parameters.
    pub(crate) fn append_params(&self, params: &mut Vec<(&'static str, String)>) {
        if let Some(year) = &self.year {
            params.push(("y", year.clone()));
        }
        if let Some(kind) = self.kind {
            params.push(("type", kind.as_str().to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_no_filter() {
        assert_eq!(SearchFilters::from_raw("", ""), SearchFilters::new());
        assert_eq!(SearchFilters::new().with_year("   "), SearchFilters::new());
        assert!(SearchFilters::from_raw("", "").is_empty());
    }

    #[test]
    fn test_params_omit_unset_filters() {
        let mut params = Vec::new();
        SearchFilters::new().append_params(&mut params);
        assert!(params.is_empty());

        SearchFilters::from_raw("1989", "movie").append_params(&mut params);
        assert_eq!(
            params,
            vec![("y", "1989".to_string()), ("type", "movie".to_string())]
        );
    }
}

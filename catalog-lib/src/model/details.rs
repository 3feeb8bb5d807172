//! Detailed item information

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::available;

/// A rating from one source, e.g. `("Rotten Tomatoes", "84%")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Full-plot details for a single catalog entry.
///
/// Text fields hold whatever the remote sent, including its "N/A"
/// placeholder; use [`Details::field`] to read them with the placeholder
/// mapped to `None`. Fields this type does not name are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Details {
    #[serde(rename = "imdbID", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub rated: String,
    #[serde(default)]
    pub released: String,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub writer: String,
    #[serde(default)]
    pub actors: String,
    #[serde(default)]
    pub plot: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub awards: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub metascore: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
    #[serde(rename = "imdbVotes", default)]
    pub imdb_votes: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(default)]
    pub box_office: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Details {
    /// Maps a raw text field to `None` when the remote had no value.
    pub fn field(value: &str) -> Option<&str> {
        available(value)
    }

    /// Returns the poster URL, or `None` when the remote has no poster.
    pub fn poster_url(&self) -> Option<&str> {
        available(&self.poster)
    }

    /// Returns the rating reported by `source`, if any.
    pub fn rating(&self, source: &str) -> Option<&str> {
        self.ratings
            .iter()
            .find(|r| r.source == source)
            .map(|r| r.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "Title":"Batman Begins","Year":"2005","Rated":"PG-13","Runtime":"140 min",
        "Director":"Christopher Nolan","Plot":"After witnessing his parents' death...",
        "Poster":"N/A","Metascore":"70","imdbRating":"8.2","imdbID":"tt0372784",
        "Type":"movie","DVD":"N/A","BoxOffice":"$206,863,479",
        "Ratings":[{"Source":"Internet Movie Database","Value":"8.2/10"},{"Source":"Metacritic","Value":"70/100"}],
        "Response":"True"
    }"#;

    #[test]
    fn test_deserialize_full_plot() {
        let details: Details = serde_json::from_str(BODY).unwrap();
        assert_eq!(details.id, "tt0372784");
        assert_eq!(details.director, "Christopher Nolan");
        assert_eq!(details.box_office, "$206,863,479");
        assert_eq!(details.rating("Metacritic"), Some("70/100"));
        assert_eq!(details.rating("Rotten Tomatoes"), None);
    }

    #[test]
    fn test_unknown_fields_kept_in_extra() {
        let details: Details = serde_json::from_str(BODY).unwrap();
        assert_eq!(details.extra.get("DVD"), Some(&serde_json::json!("N/A")));
    }

    #[test]
    fn test_placeholder_fields() {
        let details: Details = serde_json::from_str(BODY).unwrap();
        assert_eq!(details.poster_url(), None);
        assert_eq!(Details::field(&details.runtime), Some("140 min"));
        assert_eq!(Details::field("N/A"), None);
    }
}

//! Search result items

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::available;

/// One entry of a search result, as the remote lists it.
///
/// Items are identified by `id`; two items with the same id are the same
/// catalog entry even if other fields differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
}

impl Item {
    /// Creates an item with only an id set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            year: String::new(),
            poster: String::new(),
            kind: String::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Returns the poster URL, or `None` when the remote has no poster.
    pub fn poster_url(&self) -> Option<&str> {
        available(&self.poster)
    }

    /// Returns the item kind if it is one of the known kinds.
    pub fn item_kind(&self) -> Option<ItemKind> {
        ItemKind::parse(&self.kind)
    }
}

/// The kinds of entry the catalog can be filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Movie,
    Series,
    Episode,
    Game,
}

impl ItemKind {
    /// Returns the name the remote uses for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Episode => "episode",
            Self::Game => "game",
        }
    }

    /// Parses a kind name, case-insensitively.
    ///
    /// Returns `None` for empty or unknown names, which callers treat as
    /// "no kind filter".
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "movie" => Some(Self::Movie),
            "series" => Some(Self::Series),
            "episode" => Some(Self::Episode),
            "game" => Some(Self::Game),
            _ => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry of a board listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    /// Absolute URL of the post.
    pub link: String,
    /// Date as printed by the site (not parsed).
    pub date: String,
    pub writer: String,
    pub recommend: String,
    pub views: String,
}

/// Opaque continuation token taken from the `search_pos` query parameter.
///
/// The crawler only copies it into the next request; it never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a raw token. Empty tokens are not cursors.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of one crawl: posts in fetch order and the cursor to resume from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub posts: Vec<Post>,
    #[serde(rename = "next_search_pos")]
    pub next_cursor: Option<Cursor>,
}

impl SearchResult {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A board found through the site-wide board directory search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub id: String,
    pub name: String,
}

impl BoardSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

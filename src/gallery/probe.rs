//! Board routing: finding which URL family serves a board.

use std::fmt;

use tracing::{debug, info};

use super::models::Cursor;
use super::session::Session;
use crate::config::Config;
use crate::constants::SEARCH_TYPE;

/// The URL families a board can live under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardKind {
    Minor,
    Main,
    Mini,
    Person,
}

impl BoardKind {
    /// Probe order. Several families can accept the same id syntactically,
    /// only one serves content, and the first valid answer wins.
    pub const PROBE_ORDER: [Self; 4] = [Self::Minor, Self::Main, Self::Mini, Self::Person];

    #[must_use]
    pub fn list_path(self) -> &'static str {
        match self {
            Self::Minor => "/mgallery/board/lists/",
            Self::Main => "/board/lists/",
            Self::Mini => "/mini/board/lists/",
            Self::Person => "/person/board/lists/",
        }
    }
}

impl fmt::Display for BoardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Minor => "minor",
            Self::Main => "main",
            Self::Mini => "mini",
            Self::Person => "person",
        };
        f.write_str(name)
    }
}

/// Base listing URL resolved for one board during one crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRoute {
    pub kind: BoardKind,
    base_url: String,
}

impl BoardRoute {
    #[must_use]
    pub fn new(origin: &str, kind: BoardKind) -> Self {
        Self {
            kind,
            base_url: format!("{origin}{}", kind.list_path()),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search URL for `keyword` on `board_id`.
    ///
    /// The page number is always 1; later pages are reached only through the
    /// cursor, which is appended exactly as the site issued it.
    #[must_use]
    pub fn search_url(&self, board_id: &str, keyword: &str, cursor: Option<&Cursor>) -> String {
        let mut url = format!(
            "{}?id={}&s_type={SEARCH_TYPE}&s_keyword={}&page=1",
            self.base_url,
            urlencoding::encode(board_id),
            urlencoding::encode(keyword),
        );
        if let Some(cursor) = cursor {
            url.push_str("&search_pos=");
            url.push_str(cursor.as_str());
        }
        url
    }
}

/// Try each URL family in order and return the first that serves a listing.
///
/// Every candidate gets exactly one request with the probe timeout; a failure
/// of any kind moves on to the next candidate.
pub async fn probe(
    session: &Session,
    config: &Config,
    board_id: &str,
    keyword: &str,
) -> Option<BoardRoute> {
    for kind in BoardKind::PROBE_ORDER {
        let route = BoardRoute::new(&config.gallery_origin, kind);
        let url = route.search_url(board_id, keyword, None);

        match session.get_listing(&url, config.probe_timeout).await {
            Ok(_) => {
                info!(board = %board_id, kind = %kind, "Resolved board route");
                return Some(route);
            }
            Err(e) => {
                debug!(board = %board_id, kind = %kind, error = %e, "Probe failed");
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_order_is_fixed() {
        let paths: Vec<_> = BoardKind::PROBE_ORDER
            .iter()
            .map(|k| k.list_path())
            .collect();
        assert_eq!(
            paths,
            [
                "/mgallery/board/lists/",
                "/board/lists/",
                "/mini/board/lists/",
                "/person/board/lists/",
            ]
        );
    }

    #[test]
    fn test_search_url_without_cursor() {
        let route = BoardRoute::new("https://gall.dcinside.com", BoardKind::Minor);
        assert_eq!(
            route.search_url("owgenji", "genji", None),
            "https://gall.dcinside.com/mgallery/board/lists/?id=owgenji&s_type=search_subject_memo&s_keyword=genji&page=1"
        );
    }

    #[test]
    fn test_search_url_encodes_keyword_not_cursor() {
        let route = BoardRoute::new("https://gall.dcinside.com", BoardKind::Main);
        let cursor = Cursor::new("-10%2B5").unwrap();
        let url = route.search_url("game", "겐지 팁", Some(&cursor));
        assert!(url.starts_with("https://gall.dcinside.com/board/lists/?id=game&"));
        assert!(url.contains("s_keyword=%EA%B2%90%EC%A7%80%20%ED%8C%81"));
        assert!(url.ends_with("&search_pos=-10%2B5"));
    }
}

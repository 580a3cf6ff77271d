//! Board directory: site-wide board search and the built-in presets.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use super::models::BoardSummary;
use super::session::Session;
use crate::config::Config;

static BOARD_ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.gallname_txt").expect("Invalid selector"));
static BOARD_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"id=([^&]+)").expect("Invalid regex"));

/// Boards offered before any directory search.
pub const PRESET_BOARDS: [(&str, &str); 3] = [
    ("owgenji", "Overwatch Genji"),
    ("overwatch2", "Overwatch 2"),
    ("overwatch2_tv", "Overwatch 2 TV"),
];

#[must_use]
pub fn preset_boards() -> Vec<BoardSummary> {
    PRESET_BOARDS
        .iter()
        .map(|(id, name)| BoardSummary::new(*id, *name))
        .collect()
}

/// Search the board directory for `keyword`.
///
/// Returns an empty list on any failure.
pub async fn search_boards(session: &Session, config: &Config, keyword: &str) -> Vec<BoardSummary> {
    let url = format!(
        "{}/gallery/q/{}",
        config.search_origin,
        urlencoding::encode(keyword)
    );

    let body = match session.get_text(&url, config.board_search_timeout).await {
        Ok(body) => body,
        Err(e) => {
            warn!(keyword = %keyword, error = %e, "Board search failed");
            return Vec::new();
        }
    };

    let boards = extract_boards(&body);
    debug!(keyword = %keyword, count = boards.len(), "Board search complete");
    boards
}

/// Extract `(id, name)` pairs from a board directory result page, in anchor order.
#[must_use]
pub fn extract_boards(html: &str) -> Vec<BoardSummary> {
    let document = Html::parse_document(html);

    document
        .select(&BOARD_ANCHOR)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href").unwrap_or_default();
            let id = BOARD_ID.captures(href)?.get(1)?.as_str();
            let name = anchor.text().collect::<String>().trim().to_string();
            Some(BoardSummary::new(id, name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_boards_keeps_order_and_skips_unparsable() {
        let html = r#"
            <ul class="integrate_cont_list">
              <li><a class="gallname_txt" href="https://gall.dcinside.com/mgallery/board/lists/?id=owgenji">오버워치 겐지</a></li>
              <li><a class="gallname_txt" href="https://gall.dcinside.com/">broken</a></li>
              <li><a class="gallname_txt" href="https://gall.dcinside.com/mini/board/lists/?id=genjimain&page=1"> 겐지 메인 </a></li>
              <li><a class="other" href="?id=ignored">ignored</a></li>
            </ul>"#;

        let boards = extract_boards(html);

        assert_eq!(
            boards,
            vec![
                BoardSummary::new("owgenji", "오버워치 겐지"),
                BoardSummary::new("genjimain", "겐지 메인"),
            ]
        );
    }

    #[test]
    fn test_anchor_without_href_skipped() {
        let html = r#"<a class="gallname_txt">no link</a>"#;
        assert!(extract_boards(html).is_empty());
    }

    #[test]
    fn test_preset_boards() {
        let presets = preset_boards();
        assert_eq!(presets.len(), 3);
        assert_eq!(presets[0], BoardSummary::new("owgenji", "Overwatch Genji"));
    }
}

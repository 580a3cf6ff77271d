//! Extraction of a whole listing page: the post table and the "next" cursor.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::trace;

use super::models::{Cursor, Post};
use super::row::extract_row;
use crate::constants::DECOY_TABLE_ID;

static LIST_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.gall_list").expect("Invalid selector"));
static CONTENT_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr.ub-content").expect("Invalid selector"));
static NEXT_ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.search_next").expect("Invalid selector"));

static SEARCH_POS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"search_pos=([^&]+)").expect("Invalid regex"));

/// Posts and continuation cursor read from one listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub posts: Vec<Post>,
    pub next_cursor: Option<Cursor>,
}

/// Parse a listing page body and extract it.
///
/// The parsed document does not outlive this call, so callers in async code
/// never hold it across an await point.
#[must_use]
pub fn parse_listing(body: &str, origin: &str) -> ListingPage {
    let document = Html::parse_document(body);
    extract_page(&document, origin)
}

/// Extract posts and the next cursor from a parsed listing page.
#[must_use]
pub fn extract_page(document: &Html, origin: &str) -> ListingPage {
    let posts = listing_table(document)
        .map(|table| extract_posts(table, origin))
        .unwrap_or_default();

    ListingPage {
        posts,
        next_cursor: next_cursor(document),
    }
}

/// First list table that is not the embedded search widget.
fn listing_table(document: &Html) -> Option<ElementRef<'_>> {
    document
        .select(&LIST_TABLE)
        .find(|table| table.value().attr("id") != Some(DECOY_TABLE_ID))
}

fn extract_posts(table: ElementRef<'_>, origin: &str) -> Vec<Post> {
    table
        .select(&CONTENT_ROW)
        .filter_map(|row| match extract_row(row, origin) {
            Ok(post) => Some(post),
            Err(reason) => {
                trace!(?reason, "Skipping listing row");
                None
            }
        })
        .collect()
}

fn next_cursor(document: &Html) -> Option<Cursor> {
    let anchor = document.select(&NEXT_ANCHOR).next()?;
    let href = anchor.value().attr("href")?;
    cursor_from_href(href)
}

/// Pull the raw `search_pos` token out of an href, stopping at the next `&`.
#[must_use]
pub fn cursor_from_href(href: &str) -> Option<Cursor> {
    SEARCH_POS
        .captures(href)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Cursor::new(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://gall.dcinside.com";

    fn row(no: u32, title: &str) -> String {
        format!(
            r#"<tr class="ub-content us-post">
                <td class="gall_num">{no}</td>
                <td class="gall_tit ub-word"><a href="/mgallery/board/view/?id=owgenji&no={no}">{title}</a></td>
                <td class="gall_writer ub-writer">writer{no}</td>
                <td class="gall_date">01.0{}</td>
                <td class="gall_count">{}</td>
                <td class="gall_recommend">{}</td>
            </tr>"#,
            no % 9 + 1,
            no * 10,
            no % 3
        )
    }

    #[test]
    fn test_extract_page_with_cursor() {
        let html = format!(
            r#"<html><body>
            <table class="gall_list">
              <thead><tr><th>번호</th><th>제목</th></tr></thead>
              <tbody>
                <tr class="ub-content"><td class="gall_num">공지</td><td class="gall_tit"><a href="/notice">notice</a></td></tr>
                {}
                {}
              </tbody>
            </table>
            <div class="bottom_paging_box">
              <a class="search_next" href="/mgallery/board/lists/?id=owgenji&page=1&search_pos=-4821934&s_type=search_subject_memo&s_keyword=genji">다음검색</a>
            </div>
            </body></html>"#,
            row(11, "first"),
            row(10, "second")
        );

        let page = parse_listing(&html, ORIGIN);

        assert_eq!(page.posts.len(), 2);
        assert_eq!(page.posts[0].title, "first");
        assert_eq!(page.posts[1].title, "second");
        assert_eq!(page.posts[0].views, "110");
        assert_eq!(page.next_cursor, Cursor::new("-4821934"));
    }

    #[test]
    fn test_decoy_table_skipped() {
        let html = format!(
            r#"<table id="kakao_seach_list" class="gall_list"><tbody>{}</tbody></table>
               <table class="gall_list"><tbody>{}</tbody></table>"#,
            row(1, "decoy"),
            row(2, "real")
        );

        let page = parse_listing(&html, ORIGIN);

        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.posts[0].title, "real");
    }

    #[test]
    fn test_only_decoy_table_yields_nothing() {
        let html = format!(
            r#"<table id="kakao_seach_list" class="gall_list"><tbody>{}</tbody></table>"#,
            row(1, "decoy")
        );

        let page = parse_listing(&html, ORIGIN);

        assert!(page.posts.is_empty());
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn test_no_table_still_reads_cursor() {
        let html = r#"<div class="gall_list">nothing</div>
            <a class="search_next" href="?search_pos=-100">next</a>"#;

        let page = parse_listing(html, ORIGIN);

        assert!(page.posts.is_empty());
        assert_eq!(page.next_cursor, Cursor::new("-100"));
    }

    #[test]
    fn test_next_anchor_without_token() {
        let without_param = r#"<table class="gall_list"></table>
            <a class="search_next" href="/board/lists/?id=x&page=2">next</a>"#;
        assert_eq!(parse_listing(without_param, ORIGIN).next_cursor, None);

        let without_href = r#"<table class="gall_list"></table><a class="search_next">next</a>"#;
        assert_eq!(parse_listing(without_href, ORIGIN).next_cursor, None);
    }

    #[test]
    fn test_cursor_from_href() {
        assert_eq!(
            cursor_from_href("/board/lists/?id=a&search_pos=-123&page=1"),
            Cursor::new("-123")
        );
        assert_eq!(cursor_from_href("?search_pos=abc%2Fdef"), Cursor::new("abc%2Fdef"));
        assert_eq!(cursor_from_href("?search_pos=&page=1"), None);
        assert_eq!(cursor_from_href("/board/lists/?id=a"), None);
    }
}

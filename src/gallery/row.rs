//! Extraction of a single post from one listing table row.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use super::models::Post;
use crate::constants::UNKNOWN_WRITER;

static NUMBER_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".gall_num").expect("Invalid selector"));
static TITLE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".gall_tit a").expect("Invalid selector"));
static WRITER_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".gall_writer").expect("Invalid selector"));
static DATE_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".gall_date").expect("Invalid selector"));
static RECOMMEND_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".gall_recommend").expect("Invalid selector"));
static VIEWS_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".gall_count").expect("Invalid selector"));

/// Why a row did not produce a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSkip {
    /// No number cell at all.
    MissingNumber,
    /// Number cell holds a marker such as a notice or ad label.
    NotNumeric(String),
    MissingTitleLink,
    MissingHref,
    EmptyTitle,
}

/// Extract a post from a `tr.ub-content` row.
///
/// The number and title cells are required; writer, date, recommend and view
/// cells each fall back to their own default when absent.
///
/// # Errors
///
/// Returns the [`RowSkip`] reason when the row is not a data row.
pub fn extract_row(row: ElementRef<'_>, origin: &str) -> Result<Post, RowSkip> {
    let number = cell_text(row, &NUMBER_CELL).ok_or(RowSkip::MissingNumber)?;
    if !is_post_number(&number) {
        return Err(RowSkip::NotNumeric(number));
    }

    let anchor = row
        .select(&TITLE_LINK)
        .next()
        .ok_or(RowSkip::MissingTitleLink)?;
    let href = anchor.value().attr("href").ok_or(RowSkip::MissingHref)?;
    let title = element_text(anchor);
    if title.is_empty() {
        return Err(RowSkip::EmptyTitle);
    }

    let writer = cell_text(row, &WRITER_CELL).unwrap_or_else(|| UNKNOWN_WRITER.to_string());
    let date = cell_text(row, &DATE_CELL).unwrap_or_default();
    let recommend = cell_text(row, &RECOMMEND_CELL).unwrap_or_else(|| "0".to_string());
    let views = cell_text(row, &VIEWS_CELL).unwrap_or_else(|| "0".to_string());

    Ok(Post {
        title,
        link: format!("{origin}{href}"),
        date,
        writer,
        recommend,
        views,
    })
}

/// Trimmed text of the first matching cell, or `None` when the cell is absent.
fn cell_text(row: ElementRef<'_>, selector: &Selector) -> Option<String> {
    row.select(selector).next().map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn is_post_number(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

//! Gallery board crawler: routing, listing extraction and cursor pagination.

mod boards;
mod crawler;
mod models;
mod page;
mod probe;
mod row;
mod session;

pub use boards::{extract_boards, preset_boards, search_boards, PRESET_BOARDS};
pub use crawler::{CrawlError, Crawler};
pub use models::{BoardSummary, Cursor, Post, SearchResult};
pub use page::{cursor_from_href, extract_page, parse_listing, ListingPage};
pub use probe::{probe, BoardKind, BoardRoute};
pub use row::{extract_row, RowSkip};
pub use session::{FetchError, Session};

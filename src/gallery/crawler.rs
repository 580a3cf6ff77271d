//! Sequential, cursor-driven batch crawl over one board's search results.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::boards::search_boards;
use super::models::{BoardSummary, Cursor, Post, SearchResult};
use super::page::{parse_listing, ListingPage};
use super::probe::{probe, BoardRoute};
use super::session::Session;
use crate::config::Config;
use crate::constants::MAX_BATCH_LIMIT;

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),
    #[error("failed to open HTTP session: {0}")]
    Session(#[from] reqwest::Error),
}

/// Entry point for board searches. Cheap to clone; holds no per-crawl state.
#[derive(Debug, Clone)]
pub struct Crawler {
    config: Arc<Config>,
}

/// Accumulator threaded through the page loop.
#[derive(Debug, Default)]
struct BatchState {
    posts: Vec<Post>,
    /// Cursor for the next request, and the last one observed.
    cursor: Option<Cursor>,
    pages: u32,
}

enum Step {
    Continue(BatchState),
    Done(BatchState),
}

impl BatchState {
    fn starting_at(cursor: Option<Cursor>) -> Self {
        Self {
            cursor,
            ..Self::default()
        }
    }

    /// Fold one extracted page into the batch.
    fn absorb(mut self, page: ListingPage) -> Step {
        self.posts.extend(page.posts);
        self.pages += 1;
        self.cursor = page.next_cursor;
        if self.cursor.is_some() {
            Step::Continue(self)
        } else {
            Step::Done(self)
        }
    }

    fn into_result(self) -> SearchResult {
        SearchResult {
            posts: self.posts,
            // A start cursor that was never successfully used is not reported back.
            next_cursor: if self.pages == 0 { None } else { self.cursor },
        }
    }
}

impl Crawler {
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Search `board_id` for `keyword`, fetching up to `batch_limit` pages.
    ///
    /// Starts from `start_cursor` when given. A board that cannot be routed
    /// yields an empty result; a failed page fetch ends the batch and returns
    /// what was gathered so far. `batch_limit` is clamped to `1..=20`.
    ///
    /// # Errors
    ///
    /// Returns an error only for an empty board id or keyword, or when the
    /// HTTP session cannot be created.
    pub async fn crawl(
        &self,
        board_id: &str,
        keyword: &str,
        start_cursor: Option<Cursor>,
        batch_limit: u32,
    ) -> Result<SearchResult, CrawlError> {
        if board_id.trim().is_empty() {
            return Err(CrawlError::InvalidRequest("board id cannot be empty"));
        }
        if keyword.trim().is_empty() {
            return Err(CrawlError::InvalidRequest("keyword cannot be empty"));
        }
        let batch_limit = batch_limit.clamp(1, MAX_BATCH_LIMIT);

        let session = Session::open(&self.config)?;

        let Some(route) = probe(&session, &self.config, board_id, keyword).await else {
            warn!(board = %board_id, "No URL family serves this board");
            return Ok(SearchResult::empty());
        };

        info!(
            board = %board_id,
            base = %route.base_url(),
            batch_limit,
            "Starting sequential batch fetch"
        );

        let result = self
            .fetch_batch(&session, &route, board_id, keyword, start_cursor, batch_limit)
            .await;

        info!(
            board = %board_id,
            posts = result.posts.len(),
            next_cursor = ?result.next_cursor,
            "Batch fetch complete"
        );

        Ok(result)
    }

    async fn fetch_batch(
        &self,
        session: &Session,
        route: &BoardRoute,
        board_id: &str,
        keyword: &str,
        start_cursor: Option<Cursor>,
        batch_limit: u32,
    ) -> SearchResult {
        let mut state = BatchState::starting_at(start_cursor);

        for page in 1..=batch_limit {
            debug!(board = %board_id, page, cursor = ?state.cursor, "Fetching batch page");

            let url = route.search_url(board_id, keyword, state.cursor.as_ref());
            let body = match session.get_listing(&url, self.config.fetch_timeout).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(board = %board_id, page, error = %e, "Listing fetch failed, ending batch");
                    break;
                }
            };

            let listing = parse_listing(&body, &self.config.gallery_origin);
            debug!(board = %board_id, page, posts = listing.posts.len(), "Extracted listing page");

            state = match state.absorb(listing) {
                Step::Continue(next) => next,
                Step::Done(done) => {
                    debug!(board = %board_id, page, "No next cursor, results exhausted");
                    return done.into_result();
                }
            };

            if page < batch_limit && !self.config.page_delay.is_zero() {
                tokio::time::sleep(self.config.page_delay).await;
            }
        }

        state.into_result()
    }

    /// Look up boards matching `keyword` in the site-wide board directory.
    ///
    /// Never fails: any problem is logged and yields an empty list.
    pub async fn search_boards(&self, keyword: &str) -> Vec<BoardSummary> {
        let session = match Session::open(&self.config) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Failed to open HTTP session for board search");
                return Vec::new();
            }
        };
        search_boards(&session, &self.config, keyword).await
    }
}

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::AppState;
use crate::constants::MAX_BATCH_LIMIT;
use crate::gallery::{preset_boards, Cursor};

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search))
        .route("/galleries", get(galleries))
        .route("/galleries/search", get(search_galleries))
        .route("/healthz", get(health))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    gallery_id: Option<String>,
    keyword: Option<String>,
    search_pos: Option<String>,
    limit: Option<String>,
}

async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let Some(gallery_id) = params.gallery_id.filter(|s| !s.trim().is_empty()) else {
        return unprocessable("gallery_id is required");
    };
    let Some(keyword) = params.keyword.filter(|s| !s.trim().is_empty()) else {
        return unprocessable("keyword must be at least 1 character");
    };
    let Some(limit) = parse_limit(params.limit.as_deref()) else {
        return unprocessable("limit must be between 1 and 20");
    };
    let cursor = params.search_pos.and_then(Cursor::new);

    match state
        .crawler
        .crawl(&gallery_id, &keyword, cursor, limit)
        .await
    {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            tracing::error!(gallery_id = %gallery_id, "Search failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GallerySearchParams {
    keyword: Option<String>,
}

async fn search_galleries(
    State(state): State<AppState>,
    Query(params): Query<GallerySearchParams>,
) -> Response {
    let Some(keyword) = params.keyword.filter(|s| !s.trim().is_empty()) else {
        return unprocessable("keyword must be at least 1 character");
    };

    Json(state.crawler.search_boards(&keyword).await).into_response()
}

async fn galleries() -> Response {
    Json(preset_boards()).into_response()
}

async fn health() -> &'static str {
    "ok"
}

/// Batch limit from the query string; absent means one page.
fn parse_limit(raw: Option<&str>) -> Option<u32> {
    let limit = match raw {
        None => 1,
        Some(value) => value.trim().parse().ok()?,
    };
    (1..=MAX_BATCH_LIMIT).contains(&limit).then_some(limit)
}

fn unprocessable(message: &'static str) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None), Some(1));
        assert_eq!(parse_limit(Some("10")), Some(10));
        assert_eq!(parse_limit(Some("20")), Some(20));
        assert_eq!(parse_limit(Some("0")), None);
        assert_eq!(parse_limit(Some("21")), None);
        assert_eq!(parse_limit(Some("-1")), None);
        assert_eq!(parse_limit(Some("abc")), None);
        assert_eq!(parse_limit(Some("")), None);
    }
}

//! Shared constants used across the application.

/// User agent string sent with every gallery request.
///
/// The boards refuse obvious bot agents, so this mirrors a current desktop Chrome build.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Substring present in every valid listing page body.
pub const LISTING_MARKER: &str = "gall_list";

/// `id` of the embedded search widget table that must never be read as the listing.
pub const DECOY_TABLE_ID: &str = "kakao_seach_list";

/// Search type sent with every listing request (subject + body).
pub const SEARCH_TYPE: &str = "search_subject_memo";

/// Upper bound for the number of pages fetched by one crawl.
pub const MAX_BATCH_LIMIT: u32 = 20;

/// Writer shown when a row has no writer cell.
pub const UNKNOWN_WRITER: &str = "Unknown";

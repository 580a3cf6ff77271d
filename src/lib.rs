//! Gallery board search crawler.
//!
//! Resolves which URL family serves a board, walks its search results page by
//! page using the cursor the site embeds in each "next" link, and extracts the
//! post listing from the HTML. A small JSON API exposes the crawler.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod config;
pub mod constants;
pub mod gallery;
pub mod web;

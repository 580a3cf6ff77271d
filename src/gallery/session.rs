//! HTTP session used for every request of one crawl.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::constants::LISTING_MARKER;

/// Why a listing or probe request did not yield a usable page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("response is not a listing page")]
    MissingMarker,
    #[error("request timed out")]
    Timeout,
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

/// A connection-pooling client carrying the browser user agent.
///
/// One session is opened per crawl and dropped when the crawl returns.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
}

impl Session {
    /// Open a new session.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn open(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.fetch_timeout)
            .build()?;
        Ok(Self { client })
    }

    /// GET a listing page and return its body.
    ///
    /// Anything other than a 200 response containing the listing marker is a failure.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing the failed request.
    pub async fn get_listing(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        debug!(url = %url, timeout = ?timeout, "Fetching listing");

        let response = self.client.get(url).timeout(timeout).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        if !body.contains(LISTING_MARKER) {
            return Err(FetchError::MissingMarker);
        }

        Ok(body)
    }

    /// GET any page, requiring only a success status.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing the failed request.
    pub async fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let response = self.client.get(url).timeout(timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.text().await?)
    }
}

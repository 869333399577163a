use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use crate::config::OmdbConfig;
use crate::models::movie::Movie;

#[derive(Debug, Error)]
pub enum OmdbError {
    #[error("API returned status code {}", .0.as_u16())]
    Status(StatusCode),

    #[error("OMDb request failed: {0}")]
    Transport(reqwest::Error),

    #[error("Failed to decode OMDb response: {0}")]
    Decode(#[from] serde_json::Error),
}

// The request URL carries the API key, so it never reaches the message.
impl From<reqwest::Error> for OmdbError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.without_url())
    }
}

/// Title lookup against a movie metadata service.
#[async_trait]
pub trait MovieLookup: Send + Sync {
    /// Fetches the best match for `title`.
    ///
    /// A title the service does not know is still `Ok`; check
    /// [`Movie::is_found`] on the result.
    ///
    /// # Errors
    ///
    /// - [`OmdbError::Status`] when the service answers with a non-200 status
    /// - [`OmdbError::Transport`] when the request cannot be completed
    /// - [`OmdbError::Decode`] when the body is not a movie object
    async fn fetch(&self, title: &str) -> Result<Movie, OmdbError>;
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(config: &OmdbConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("cinemanager/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn lookup_url(&self, title: &str) -> String {
        format!(
            "{}?apikey={}&t={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(title)
        )
    }
}

#[async_trait]
impl MovieLookup for OmdbClient {
    async fn fetch(&self, title: &str) -> Result<Movie, OmdbError> {
        let url = self.lookup_url(title);
        debug!(event = "omdb_request", title = %title, "Looking up movie");

        let response = self.client.get(&url).send().await.inspect_err(|_| {
            metrics::counter!("omdb_requests_total", "outcome" => "transport_error").increment(1);
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            metrics::counter!("omdb_requests_total", "outcome" => "bad_status").increment(1);
            return Err(OmdbError::Status(status));
        }

        let body = response.text().await?;
        let movie: Movie = serde_json::from_str(&body).inspect_err(|_| {
            metrics::counter!("omdb_requests_total", "outcome" => "decode_error").increment(1);
        })?;

        metrics::counter!("omdb_requests_total", "outcome" => "ok").increment(1);
        Ok(movie)
    }
}

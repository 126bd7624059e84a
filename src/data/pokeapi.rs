//! PokeAPI HTTP client
//!
//! Fetches raw response bodies from PokeAPI. Decoding is left to the caller so
//! the exact bytes can be cached and decoded again on a cache hit.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

/// Base URL for PokeAPI v2
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Number of location areas shown per page
const PAGE_SIZE: u32 = 20;

/// Errors that can occur when fetching from PokeAPI
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The resource does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),
}

/// Source of raw response bodies for a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the body at `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

/// Builds request URLs against a PokeAPI base URL
#[derive(Debug, Clone)]
pub struct Endpoints {
    base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    /// Creates endpoints for `base_url`; a trailing slash is ignored
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// URL of the first location-area page
    ///
    /// Spelled the same way PokeAPI writes the `previous` link of page two, so
    /// paging back lands on the cached first page.
    pub fn first_page_url(&self) -> String {
        format!(
            "{}/location-area?offset=0&limit={}",
            self.base_url, PAGE_SIZE
        )
    }

    /// URL of a single location area by name or id
    ///
    /// `name` is used as a single path segment; check it with
    /// `is_valid_area_name` first.
    pub fn area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}", self.base_url, name)
    }
}

/// Whether `name` can stand alone as a location-area path segment
///
/// PokeAPI names are lowercase ASCII words joined by `-`, and ids are digits.
pub fn is_valid_area_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Client for fetching raw bodies from PokeAPI
#[derive(Debug, Clone, Default)]
pub struct PokeApiClient {
    client: Client,
}

impl PokeApiClient {
    /// Create a new PokeApiClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for PokeApiClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        debug!(%url, "making HTTP request");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

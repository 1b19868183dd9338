//! HTTP client for the catalog search endpoint

use crate::types::{SearchResponse, Track};
use reqwest::Client;
use tracing::{debug, warn};
use ts_types::{AppError, AppResult};

/// Client for authenticated catalog queries.
pub struct CatalogClient {
    client: Client,
    api_base: String,
}

impl CatalogClient {
    /// Create a client for the given API base URL
    /// (e.g. `https://api.spotify.com/v1`).
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Search for tracks matching a free-text query.
    ///
    /// `token` is the bearer credential from the auth flow; `limit` caps
    /// the number of returned items. A blank query returns an empty list
    /// without issuing a request.
    pub async fn search_tracks(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> AppResult<Vec<Track>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        debug!("Searching catalog for tracks: {:?}", query);

        let limit = limit.to_string();
        let response = self
            .client
            .get(format!("{}/search", self.api_base))
            .bearer_auth(token)
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Failed to send search request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Catalog search failed with status {}: {}", status, body);
            return Err(AppError::Catalog(format!(
                "Search failed with status {}: {}",
                status, body
            )));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::Catalog(format!("Failed to parse search response: {}", e)))?;

        Ok(search.tracks.items.into_iter().map(Track::from).collect())
    }
}

//! Discogs HTTP client.
//!
//! Handles communication with the Discogs database API.
//! See: https://www.discogs.com/developers/
//!
//! IMPORTANT: Discogs requires a User-Agent header and a personal access
//! token, and budgets authenticated clients to 60 requests per minute. The
//! engine's batch pacing assumes that budget; this client only bounds each
//! individual call with a timeout.

use std::time::Duration;

use super::{adapter, dto};
use crate::matching::domain::{Candidate, ProviderError, SearchStrategy, TrackCandidate};

/// User agent string - Discogs rejects requests without one.
const USER_AGENT: &str = concat!(
    "tunehound/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/tunehound/tunehound)"
);

/// Per-request timeout. A timed-out call is reported like any other failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Discogs API client.
pub struct DiscogsClient {
    token: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl DiscogsClient {
    /// Create a new client with the given personal access token.
    pub fn new(token: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            token: token.into(),
            http_client,
            base_url: "https://api.discogs.com".to_string(),
        }
    }

    /// Create a client for testing with a custom base URL.
    #[cfg(test)]
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let mut client = Self::new(token);
        client.base_url = base_url.into();
        client
    }

    /// Execute one search strategy and convert the hits to candidates.
    pub async fn search_strategy(
        &self,
        strategy: &SearchStrategy,
    ) -> Result<Vec<Candidate>, ProviderError> {
        let params = adapter::to_params(strategy);
        if params.is_empty() {
            return Ok(Vec::new());
        }
        let results = self.database_search(&params).await?;
        Ok(results
            .results
            .into_iter()
            .map(adapter::to_candidate)
            .collect())
    }

    /// Fetch a release's tracklist for track matching.
    pub async fn release_tracks(&self, release_id: u64) -> Result<Vec<TrackCandidate>, ProviderError> {
        let url = format!("{}/releases/{}", self.base_url, release_id);
        let release: dto::Release = self.get_json(&url).await?;
        Ok(adapter::to_tracks(release))
    }

    async fn database_search(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<dto::SearchResults, ProviderError> {
        let query: String = params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{}/database/search?{}", self.base_url, query);
        self.get_json(&url).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ProviderError> {
        let response = self
            .http_client
            .get(url)
            .header("Authorization", format!("Discogs token={}", self.token))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(ProviderError::Api(error.message));
            }
            return Err(ProviderError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_points_at_discogs() {
        let client = DiscogsClient::new("test-token");
        assert_eq!(client.base_url, "https://api.discogs.com");
    }

    #[test]
    fn client_with_custom_url() {
        let client = DiscogsClient::with_base_url("t", "http://localhost:8080");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn user_agent_format() {
        assert!(USER_AGENT.starts_with("tunehound/"));
    }
}

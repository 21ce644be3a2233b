//! HTTP transport for the event discovery API.
//!
//! Wraps `reqwest` with the search query built by [`crate::query`] and hands
//! the body to [`crate::normalize`]. Transport failures and non-200 statuses
//! are logged and yield an empty result; only invalid arguments are errors.

use std::time::Duration;

use eventscout_core::{AppConfig, Item};
use reqwest::{Client, StatusCode, Url};

use crate::error::DiscoveryError;
use crate::geohash;
use crate::normalize::normalize_events;
use crate::query::{build_search_url, QueryOptions};

/// Everything needed to construct a [`DiscoveryClient`].
#[derive(Clone)]
pub struct ClientSettings {
    pub api_host: String,
    pub api_path: String,
    pub api_key: String,
    pub query: QueryOptions,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl ClientSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_host: config.api_host.clone(),
            api_path: config.api_path.clone(),
            api_key: config.api_key.clone(),
            query: QueryOptions {
                default_keyword: config.default_keyword.clone(),
                radius: config.search_radius,
                geohash_precision: config.geohash_precision,
            },
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("api_host", &self.api_host)
            .field("api_path", &self.api_path)
            .field("api_key", &"[redacted]")
            .field("query", &self.query)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Client for the event discovery search endpoint.
///
/// Holds no mutable state, so one instance can serve concurrent searches.
pub struct DiscoveryClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    options: QueryOptions,
}

impl DiscoveryClient {
    /// Creates a client pointed at `settings.api_host`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidArgument`] if the API key is blank or
    /// the host/path do not form a valid URL, and [`DiscoveryError::Http`] if
    /// the underlying `reqwest::Client` cannot be constructed.
    pub fn new(settings: ClientSettings) -> Result<Self, DiscoveryError> {
        let host = settings.api_host.clone();
        Self::with_base_url(settings, &host)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`DiscoveryClient::new`].
    pub fn with_base_url(
        settings: ClientSettings,
        base_url: &str,
    ) -> Result<Self, DiscoveryError> {
        if settings.api_key.trim().is_empty() {
            return Err(DiscoveryError::InvalidArgument(
                "api key must not be empty".to_string(),
            ));
        }

        let joined = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            settings.api_path.trim_start_matches('/')
        );
        let endpoint = Url::parse(&joined).map_err(|e| {
            DiscoveryError::InvalidArgument(format!("invalid endpoint URL '{joined}': {e}"))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent)
            .build()?;

        Ok(Self {
            client,
            api_key: settings.api_key,
            endpoint,
            options: settings.query,
        })
    }

    /// The exact URL [`DiscoveryClient::search`] would request.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidArgument`] for out-of-range coordinates.
    pub fn search_url(
        &self,
        lat: f64,
        lon: f64,
        keyword: Option<&str>,
    ) -> Result<String, DiscoveryError> {
        build_search_url(
            self.endpoint.as_str(),
            &self.api_key,
            lat,
            lon,
            keyword,
            &self.options,
        )
    }

    /// Searches for events near `(lat, lon)` matching `keyword`.
    ///
    /// Only the first page of results is requested. A transport failure, a
    /// non-200 status, or an unreadable body all produce `Ok(vec![])`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidArgument`] for out-of-range
    /// coordinates; no request is sent in that case.
    pub async fn search(
        &self,
        lat: f64,
        lon: f64,
        keyword: Option<&str>,
    ) -> Result<Vec<Item>, DiscoveryError> {
        let url = self.search_url(lat, lon, keyword)?;
        let geo_point = geohash::encode(lat, lon, self.options.geohash_precision)?;

        tracing::info!(
            endpoint = %self.endpoint,
            geo_point = %geo_point,
            keyword = keyword.unwrap_or(""),
            "sending discovery search request"
        );

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(error) => {
                // The URL carries the API key.
                let error = error.without_url();
                tracing::warn!(%error, "discovery request failed");
                return Ok(Vec::new());
            }
        };

        let status = response.status();
        tracing::info!(status = status.as_u16(), "discovery response received");
        if status != StatusCode::OK {
            tracing::warn!(
                status = status.as_u16(),
                "discovery search returned non-200 status; returning no events"
            );
            return Ok(Vec::new());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(error) => {
                let error = error.without_url();
                tracing::warn!(%error, "failed reading discovery response body");
                return Ok(Vec::new());
            }
        };

        Ok(normalize_events(&body))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

//! Query-string construction for the event discovery endpoint.
//!
//! Pure string computation: nothing here performs I/O.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::DiscoveryError;
use crate::geohash;

pub const DEFAULT_KEYWORD: &str = "event";
pub const DEFAULT_RADIUS: u32 = 50;
pub const DEFAULT_GEOHASH_PRECISION: usize = 8;

/// Tunables that shape every outbound search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Keyword sent when the caller supplies none (or only whitespace).
    pub default_keyword: String,
    /// Search radius in the provider's unit.
    pub radius: u32,
    /// Length of the `geoPoint` geohash.
    pub geohash_precision: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            default_keyword: DEFAULT_KEYWORD.to_string(),
            radius: DEFAULT_RADIUS,
            geohash_precision: DEFAULT_GEOHASH_PRECISION,
        }
    }
}

/// Builds the `apikey=..&geoPoint=..&keyword=..&radius=..` query string.
///
/// The keyword and API key are UTF-8 percent-encoded, so spaces become
/// `%20` and reserved characters cannot split the query.
///
/// # Errors
///
/// Returns [`DiscoveryError::InvalidArgument`] if `api_key` is blank or the
/// coordinate/precision is rejected by [`geohash::encode`].
pub fn build_query(
    api_key: &str,
    lat: f64,
    lon: f64,
    keyword: Option<&str>,
    options: &QueryOptions,
) -> Result<String, DiscoveryError> {
    if api_key.trim().is_empty() {
        return Err(DiscoveryError::InvalidArgument(
            "api key must not be empty".to_string(),
        ));
    }

    let geo_point = geohash::encode(lat, lon, options.geohash_precision)?;
    let keyword = keyword
        .filter(|k| !k.trim().is_empty())
        .unwrap_or(options.default_keyword.as_str());

    let api_key = utf8_percent_encode(api_key, NON_ALPHANUMERIC);
    let keyword = utf8_percent_encode(keyword, NON_ALPHANUMERIC);
    let radius = options.radius;

    Ok(format!(
        "apikey={api_key}&geoPoint={geo_point}&keyword={keyword}&radius={radius}"
    ))
}

/// Builds the full request URL: `{endpoint}?{query}`.
///
/// `endpoint` is the host joined with the discovery path, e.g.
/// `https://app.ticketmaster.com/discovery/v2/events.json`.
///
/// # Errors
///
/// Same as [`build_query`].
pub fn build_search_url(
    endpoint: &str,
    api_key: &str,
    lat: f64,
    lon: f64,
    keyword: Option<&str>,
    options: &QueryOptions,
) -> Result<String, DiscoveryError> {
    let query = build_query(api_key, lat, lon, keyword, options)?;
    Ok(format!("{endpoint}?{query}"))
}

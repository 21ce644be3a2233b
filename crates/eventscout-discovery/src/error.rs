use thiserror::Error;

/// Errors returned by the discovery pipeline.
///
/// Only caller mistakes surface here. Irregular provider data (bad status
/// codes, malformed bodies, missing fields) degrades to empty results instead.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A caller-supplied argument violates the contract (coordinate out of
    /// range, zero precision, empty API key, unusable base URL).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The underlying `reqwest::Client` could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub mod client;
pub mod error;
pub mod geohash;
pub mod normalize;
pub mod query;

pub use client::{ClientSettings, DiscoveryClient};
pub use error::DiscoveryError;
pub use normalize::{normalize_document, normalize_events};
pub use query::{build_query, build_search_url, QueryOptions};

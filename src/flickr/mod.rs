//! Photo search backends
//!
//! This module defines the `PhotoSearch` trait and implementations for photo
//! sources. Each backend is a single file implementing the trait.
//!
//! ## Flex Point
//! Adding a new photo search backend requires:
//! 1. Create `src/flickr/{backend_name}.rs` implementing `PhotoSearch`
//! 2. Add `pub mod {backend_name};` below
//! 3. Register it in `get_backend` and `available_backends`

pub mod canned;
pub mod client;

pub use canned::CannedBackend;
pub use client::FlickrClient;

use crate::error::Result;
use crate::location::Coordinate;
use serde::{Deserialize, Serialize};

/// An image URL, the unit stored in the feed
///
/// Opaque value; equality is exact string match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoUrl(String);

impl PhotoUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PhotoUrl {
    fn from(url: String) -> Self {
        Self(url)
    }
}

impl std::fmt::Display for PhotoUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Construct a static photo URL from its record components
///
/// See https://www.flickr.com/services/api/misc.urls.html for the scheme.
pub fn photo_url(farm: u64, server: &str, id: &str, secret: &str, size: &str) -> PhotoUrl {
    PhotoUrl(format!(
        "https://farm{}.staticflickr.com/{}/{}_{}_{}.jpg",
        farm, server, id, secret, size
    ))
}

/// Search parameters sent alongside the coordinate
///
/// Defaults are deliberately conservative: a tight radius, a small result cap
/// (one photo is shown per location, so ten candidates is plenty), safe search
/// on, and a minimum-taken-date floor so Flickr doesn't treat the query as
/// open-ended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Search radius in kilometers
    pub radius_km: f64,

    /// Maximum results per search
    pub per_page: u32,

    /// Result page to fetch
    pub page: u32,

    /// Geo accuracy level (16 is street level, the highest Flickr allows)
    pub accuracy: u8,

    /// Restrict results to safe content
    pub safe_search: bool,

    /// Oldest allowed taken-date, "YYYY-MM-DD HH:MM:SS"
    pub min_taken_date: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            radius_km: 1.0,
            per_page: 10,
            page: 1,
            accuracy: 16,
            safe_search: true,
            min_taken_date: "2010-01-01 00:00:01".to_string(),
        }
    }
}

impl SearchParams {
    /// Expand into query pairs for a search around `center`
    ///
    /// Only geotagged entries are requested.
    pub fn to_query_pairs(&self, center: Coordinate) -> Vec<(&'static str, String)> {
        vec![
            ("lat", center.lat.to_string()),
            ("lon", center.lng.to_string()),
            ("has_geo", "1".to_string()),
            ("radius", self.radius_km.to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
            ("safe_search", if self.safe_search { "1" } else { "0" }.to_string()),
            ("accuracy", self.accuracy.to_string()),
            ("min_taken_date", self.min_taken_date.clone()),
        ]
    }
}

/// Trait for photo search backends
///
/// Implementations must be thread-safe (Send + Sync) to work with the async
/// server.
pub trait PhotoSearch: Send + Sync {
    /// Returns the backend name (e.g., "flickr", "canned")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of this backend
    fn description(&self) -> &'static str;

    /// Search for geotagged photos around `center`
    ///
    /// Returns image URLs in the order the backend reported them.
    fn search(
        &self,
        center: Coordinate,
        params: &SearchParams,
    ) -> impl std::future::Future<Output = Result<Vec<PhotoUrl>>> + Send;
}

/// Information about a backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendInfo {
    /// Backend name (used in config/API)
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// A registered search backend
///
/// Enum dispatch keeps the pipeline generic over `PhotoSearch` while letting
/// config pick the backend by name at runtime.
#[derive(Debug)]
pub enum SearchBackend {
    Flickr(FlickrClient),
    Canned(CannedBackend),
}

impl PhotoSearch for SearchBackend {
    fn name(&self) -> &'static str {
        match self {
            Self::Flickr(backend) => backend.name(),
            Self::Canned(backend) => backend.name(),
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Flickr(backend) => backend.description(),
            Self::Canned(backend) => backend.description(),
        }
    }

    async fn search(&self, center: Coordinate, params: &SearchParams) -> Result<Vec<PhotoUrl>> {
        match self {
            Self::Flickr(backend) => backend.search(center, params).await,
            Self::Canned(backend) => backend.search(center, params).await,
        }
    }
}

/// Get a backend by name with an optional API credential
///
/// Unrecognized names fall back to the Flickr backend.
pub fn get_backend(name: &str, api_key: Option<&str>) -> SearchBackend {
    match name {
        "canned" => SearchBackend::Canned(CannedBackend::new()),
        _ => SearchBackend::Flickr(FlickrClient::new(api_key.unwrap_or_default())),
    }
}

/// List all available backends with their info
pub fn available_backends() -> Vec<BackendInfo> {
    vec![
        BackendInfo {
            name: "flickr".to_string(),
            description: "Flickr geotagged photo search".to_string(),
        },
        BackendInfo {
            name: "canned".to_string(),
            description: "Fixed offline photo list (for development and testing)".to_string(),
        },
    ]
}

/// Outcome of a one-shot search, for CLI output formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    /// Search center
    pub center: Coordinate,

    /// Search radius in kilometers
    pub radius_km: f64,

    /// Backend that produced the results
    pub backend: String,

    /// Image URLs in response order
    pub urls: Vec<PhotoUrl>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_url_formula() {
        let url = photo_url(1, "2", "3", "4", "c");
        assert_eq!(url.as_str(), "https://farm1.staticflickr.com/2/3_4_c.jpg");
    }

    #[test]
    fn test_photo_url_equality_is_exact() {
        let a = photo_url(5, "srv", "id", "sec", "c");
        let b = photo_url(5, "srv", "id", "sec", "c");
        let other = photo_url(5, "srv", "id", "sec", "z");

        assert_eq!(a, b);
        assert_ne!(a, other);
    }

    #[test]
    fn test_search_params_defaults() {
        let params = SearchParams::default();

        assert_eq!(params.radius_km, 1.0);
        assert_eq!(params.per_page, 10);
        assert_eq!(params.page, 1);
        assert_eq!(params.accuracy, 16);
        assert!(params.safe_search);
        assert_eq!(params.min_taken_date, "2010-01-01 00:00:01");
    }

    #[test]
    fn test_query_pairs_cover_search_policy() {
        let params = SearchParams::default();
        let pairs = params.to_query_pairs(Coordinate::new(51.5074, -0.1278));

        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("lat"), Some("51.5074"));
        assert_eq!(get("lon"), Some("-0.1278"));
        assert_eq!(get("has_geo"), Some("1"));
        assert_eq!(get("radius"), Some("1"));
        assert_eq!(get("per_page"), Some("10"));
        assert_eq!(get("page"), Some("1"));
        assert_eq!(get("safe_search"), Some("1"));
        assert_eq!(get("accuracy"), Some("16"));
        assert_eq!(get("min_taken_date"), Some("2010-01-01 00:00:01"));
    }

    #[test]
    fn test_get_backend_registry() {
        assert_eq!(get_backend("flickr", None).name(), "flickr");
        assert_eq!(get_backend("canned", None).name(), "canned");
        // unknown names fall back to flickr
        assert_eq!(get_backend("bogus", None).name(), "flickr");
    }

    #[test]
    fn test_available_backends() {
        let backends = available_backends();
        assert_eq!(backends.len(), 2);
        assert!(backends.iter().any(|b| b.name == "flickr"));
        assert!(backends.iter().any(|b| b.name == "canned"));
    }

    #[test]
    fn test_photo_url_serialization_is_transparent() {
        let url = photo_url(1, "2", "3", "4", "c");
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, "\"https://farm1.staticflickr.com/2/3_4_c.jpg\"");

        let parsed: PhotoUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, url);
    }
}

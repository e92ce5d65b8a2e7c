//! Canned backend for development and testing
//!
//! Serves a fixed list of photo URLs without touching the network. Useful for
//! exercising the pipeline, the feed and the server without a Flickr API key.
//! Because the list never changes, repeated searches also demonstrate the
//! feed's duplicate-fallback insertion.

use crate::error::Result;
use crate::flickr::{photo_url, PhotoSearch, PhotoUrl, SearchParams};
use crate::location::Coordinate;

/// Offline photo search backend
#[derive(Debug, Clone)]
pub struct CannedBackend {
    urls: Vec<PhotoUrl>,
}

impl CannedBackend {
    /// Create a backend with a small built-in photo list
    pub fn new() -> Self {
        Self {
            urls: vec![
                photo_url(66, "65535", "52250012345", "0a1b2c3d4e", "c"),
                photo_url(66, "65535", "52250023456", "1b2c3d4e5f", "c"),
                photo_url(66, "65535", "52250034567", "2c3d4e5f60", "c"),
            ],
        }
    }

    /// Create a backend that serves exactly `urls`
    pub fn with_urls(urls: Vec<PhotoUrl>) -> Self {
        Self { urls }
    }

    /// Create a backend that always returns no photos
    pub fn empty() -> Self {
        Self { urls: Vec::new() }
    }
}

impl Default for CannedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoSearch for CannedBackend {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn description(&self) -> &'static str {
        "Fixed offline photo list (for development and testing)"
    }

    async fn search(&self, center: Coordinate, _params: &SearchParams) -> Result<Vec<PhotoUrl>> {
        center.validate()?;
        Ok(self.urls.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_fixed_list() {
        let backend = CannedBackend::new();
        let center = Coordinate::new(40.7128, -74.0060);

        let first = backend.search(center, &SearchParams::default()).await.unwrap();
        let second = backend.search(center, &SearchParams::default()).await.unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_with_urls() {
        let urls = vec![photo_url(1, "2", "3", "4", "c")];
        let backend = CannedBackend::with_urls(urls.clone());

        let found = backend
            .search(Coordinate::new(0.0, 0.0), &SearchParams::default())
            .await
            .unwrap();

        assert_eq!(found, urls);
    }

    #[tokio::test]
    async fn test_empty_backend() {
        let backend = CannedBackend::empty();
        let found = backend
            .search(Coordinate::new(0.0, 0.0), &SearchParams::default())
            .await
            .unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_still_validates_coordinates() {
        let backend = CannedBackend::new();
        let result = backend
            .search(Coordinate::new(0.0, 200.0), &SearchParams::default())
            .await;

        assert!(result.is_err());
    }

    #[test]
    fn test_backend_identity() {
        let backend = CannedBackend::new();
        assert_eq!(backend.name(), "canned");
        assert!(backend.description().contains("offline"));
    }
}

//! Centralized constants for the photo-wander crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// External API endpoints
pub mod api {
    /// Flickr REST endpoint (all methods go through this URL)
    pub const FLICKR_REST_URL: &str = "https://api.flickr.com/services/rest/";

    /// Flickr method name for geotagged photo search
    pub const FLICKR_SEARCH_METHOD: &str = "flickr.photos.search";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";
}

/// Photo URL construction
pub mod photo {
    /// Size token appended to every photo URL ("c" is Flickr's medium 800px)
    pub const PHOTO_SIZE: &str = "c";
}

/// Cache settings
pub mod cache {
    /// IP location cache duration in seconds (1 hour)
    pub const IP_LOCATION_TTL_SECS: u64 = 3600;

    /// IP location cache file name
    pub const IP_LOCATION_CACHE_FILE: &str = "ip_location_cache.json";
}

//! photo-wander: Location-Triggered Photo Discovery
//!
//! A library and CLI tool for turning a stream of location events into a
//! deduplicated feed of geotagged Flickr photo URLs.
//!
//! ## Features
//!
//! - Multiple search backends (Flickr, canned offline list)
//! - Event throttling so bursts of location fixes don't hammer the API
//! - Newest-first feed with duplicate-avoiding insertion
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use photo_wander::feed::FeedStore;
//! use photo_wander::flickr::photo_url;
//! use photo_wander::throttle::UpdateThrottle;
//! use chrono::{Duration, Utc};
//!
//! // The feed prefers novel URLs but always advances
//! let mut feed = FeedStore::new();
//! feed.insert_deduplicated(&[photo_url(1, "2", "3", "4", "c")]);
//! assert_eq!(feed.len(), 1);
//!
//! // The throttle gates how often location events trigger searches
//! let mut throttle = UpdateThrottle::new(Duration::seconds(20), Utc::now());
//! let later = Utc::now() + Duration::seconds(1);
//! assert!(throttle.should_accept(later));
//! throttle.record_accepted(later);
//! assert!(!throttle.should_accept(later + Duration::seconds(5)));
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod feed;
pub mod flickr;
pub mod format;
pub mod location;
pub mod pipeline;
pub mod server;
pub mod throttle;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use feed::FeedStore;
pub use flickr::{PhotoSearch, PhotoUrl, SearchParams};
pub use location::{Coordinate, LocationEvent};
pub use pipeline::{DiscoveryOutcome, DiscoveryPipeline};
pub use throttle::UpdateThrottle;

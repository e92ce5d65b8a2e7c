//! Location-triggered discovery pipeline
//!
//! Wires the throttle, a photo search backend and the feed together: each
//! location event either dies at the throttle or triggers one search whose
//! result inserts at most one URL into the feed. Search failures are logged
//! and dropped, leaving all state unchanged.
//!
//! Searches are serialized: `on_location_update` holds `&mut self` across the
//! await, so a second event cannot start a search while one is in flight. The
//! server keeps the pipeline behind an async mutex for the same reason.

use crate::feed::FeedStore;
use crate::flickr::{PhotoSearch, PhotoUrl, SearchParams};
use crate::location::{latest, LocationEvent};
use crate::throttle::UpdateThrottle;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// What a single location event amounted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// The event arrived inside the throttle window
    Throttled,

    /// The search failed; the error was logged and dropped
    Failed,

    /// The search succeeded but returned no photos
    NoPhotos,

    /// One URL was inserted at the front of the feed
    Inserted(PhotoUrl),
}

/// Drives photo discovery from location events
#[derive(Debug)]
pub struct DiscoveryPipeline<B: PhotoSearch> {
    backend: B,
    params: SearchParams,
    throttle: UpdateThrottle,
    feed: FeedStore,
}

impl<B: PhotoSearch> DiscoveryPipeline<B> {
    /// Create a pipeline with an empty feed
    pub fn new(backend: B, params: SearchParams, throttle: UpdateThrottle) -> Self {
        Self {
            backend,
            params,
            throttle,
            feed: FeedStore::new(),
        }
    }

    /// Handle one location event
    ///
    /// The throttle gates the event first; an accepted event runs exactly one
    /// search and inserts at most one URL. Errors never propagate out of the
    /// pipeline: they are logged here and reported as [`DiscoveryOutcome::Failed`].
    pub async fn on_location_update(&mut self, event: LocationEvent) -> DiscoveryOutcome {
        if !self.throttle.should_accept(event.at) {
            debug!(
                lat = event.coordinate.lat,
                lng = event.coordinate.lng,
                next_allowed = %self.throttle.next_allowed(),
                "location update throttled"
            );
            return DiscoveryOutcome::Throttled;
        }

        self.throttle.record_accepted(event.at);

        match self.backend.search(event.coordinate, &self.params).await {
            Err(e) => {
                warn!(
                    backend = self.backend.name(),
                    error = %e,
                    "photo search failed"
                );
                DiscoveryOutcome::Failed
            }
            Ok(urls) if urls.is_empty() => {
                debug!(
                    lat = event.coordinate.lat,
                    lng = event.coordinate.lng,
                    "search returned no photos"
                );
                DiscoveryOutcome::NoPhotos
            }
            Ok(urls) => match self.feed.insert_deduplicated(&urls) {
                Some(url) => {
                    info!(url = %url, feed_size = self.feed.len(), "photo added to feed");
                    DiscoveryOutcome::Inserted(url)
                }
                // unreachable with a non-empty candidate list, but don't panic on it
                None => DiscoveryOutcome::NoPhotos,
            },
        }
    }

    /// Handle a batch of location events, acting only on the most recent
    ///
    /// Providers may deliver several fixes at once; everything but the last
    /// one is ignored. An empty batch is throttled by definition of "nothing
    /// to do".
    pub async fn on_location_batch(&mut self, events: &[LocationEvent]) -> DiscoveryOutcome {
        match latest(events) {
            Some(event) => self.on_location_update(*event).await,
            None => DiscoveryOutcome::Throttled,
        }
    }

    /// The current feed, newest first
    pub fn feed(&self) -> &FeedStore {
        &self.feed
    }

    /// Remove every URL from the feed
    pub fn clear_feed(&mut self) {
        self.feed.clear();
    }

    /// Name of the search backend in use
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// When the throttle will next accept an event
    pub fn next_allowed(&self) -> DateTime<Utc> {
        self.throttle.next_allowed()
    }
}

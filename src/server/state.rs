//! Server shared state
//!
//! Holds configuration and the discovery pipeline for the HTTP server. The
//! pipeline is the single owner of the feed; handlers reach it only through
//! the async mutex, which both serializes searches and gives feed reads a
//! consistent snapshot.

use crate::config::Config;
use crate::flickr::{get_backend, SearchBackend};
use crate::pipeline::DiscoveryPipeline;
use crate::throttle::UpdateThrottle;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, RwLock};

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Arc<RwLock<Config>>,

    /// The discovery pipeline, exclusively owned behind a mutex
    pipeline: Mutex<DiscoveryPipeline<SearchBackend>>,
}

impl AppState {
    /// Create application state from config
    ///
    /// The throttle starts from the current instant, so the server accepts
    /// its first location event as soon as one arrives.
    pub fn new(config: Config) -> Self {
        let backend = get_backend(&config.defaults.backend, Some(&config.api_keys.flickr));
        let throttle = UpdateThrottle::new(
            Duration::seconds(config.throttle.interval_secs as i64),
            Utc::now(),
        );
        let pipeline = DiscoveryPipeline::new(backend, config.search_params(), throttle);

        Self::with_pipeline(config, pipeline)
    }

    /// Create application state around an existing pipeline
    pub fn with_pipeline(config: Config, pipeline: DiscoveryPipeline<SearchBackend>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            pipeline: Mutex::new(pipeline),
        }
    }

    /// Lock the pipeline for exclusive use
    pub async fn pipeline(&self) -> MutexGuard<'_, DiscoveryPipeline<SearchBackend>> {
        self.pipeline.lock().await
    }
}

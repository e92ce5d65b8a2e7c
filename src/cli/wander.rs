//! Wander command handler
//!
//! Foreground discovery loop: polls a location provider on an interval and
//! feeds each fix through the discovery pipeline. The throttle decides which
//! fixes actually trigger a search, so polling faster than the throttle
//! window just means fresher fixes, not more API calls. Newly discovered
//! photo URLs are printed to stdout as they land in the feed.

use crate::config::Config;
use crate::error::Result;
use crate::flickr::get_backend;
use crate::location::ip::IpLocator;
use crate::location::{Coordinate, LocationEvent};
use crate::pipeline::{DiscoveryOutcome, DiscoveryPipeline};
use crate::throttle::UpdateThrottle;
use chrono::{Duration, Utc};
use clap::Args;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Wander command arguments
#[derive(Args)]
pub struct WanderArgs {
    /// Latitude of a fixed location to wander around
    #[arg(long)]
    pub lat: Option<f64>,

    /// Longitude of a fixed location to wander around
    #[arg(long)]
    pub lng: Option<f64>,

    /// Follow the current location (IP geolocation)
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub here: bool,

    /// Seconds between location polls
    #[arg(long, default_value = "10")]
    pub poll_secs: u64,

    /// Search backend
    #[arg(long, short = 'b')]
    pub backend: Option<String>,

    /// Stop after this many discovered photos (0 = run until interrupted)
    #[arg(long, default_value = "0")]
    pub limit: usize,
}

/// Where each poll gets its coordinate from
enum Center {
    Fixed(Coordinate),
    Here,
}

/// Run the wander command
pub async fn run(args: WanderArgs) -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    let center = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => {
            let coordinate = Coordinate::new(lat, lng);
            coordinate.validate()?;
            Center::Fixed(coordinate)
        }
        _ if args.here || config.location.default_here => Center::Here,
        _ => {
            eprintln!("Error: provide --lat and --lng, or use --here");
            std::process::exit(1);
        }
    };

    let backend_name = args
        .backend
        .unwrap_or_else(|| config.defaults.backend.clone());
    let backend = get_backend(&backend_name, Some(&config.api_keys.flickr));

    let throttle = UpdateThrottle::new(
        Duration::seconds(config.throttle.interval_secs as i64),
        Utc::now(),
    );
    let mut pipeline = DiscoveryPipeline::new(backend, config.search_params(), throttle);

    info!(
        backend = %backend_name,
        poll_secs = args.poll_secs,
        throttle_secs = config.throttle.interval_secs,
        "wandering"
    );

    let locator = IpLocator::new();
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(args.poll_secs.max(1)));
    let mut discovered = 0usize;

    loop {
        interval.tick().await;

        let coordinate = match &center {
            Center::Fixed(coordinate) => *coordinate,
            Center::Here => match locator.locate().await {
                Ok(location) => location.coordinate,
                Err(e) => {
                    // a missed fix is not fatal; wait for the next poll
                    warn!(error = %e, "location poll failed");
                    continue;
                }
            },
        };

        let outcome = pipeline
            .on_location_update(LocationEvent::now(coordinate))
            .await;

        if let DiscoveryOutcome::Inserted(url) = outcome {
            println!("{}", url);
            discovered += 1;

            if args.limit > 0 && discovered >= args.limit {
                info!(discovered, "limit reached, stopping");
                break;
            }
        }
    }

    Ok(())
}

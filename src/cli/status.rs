//! Status command handler
//!
//! Shows the configured backend and, optionally, whether a local server is up.

use crate::config::Config;
use crate::error::Result;
use crate::flickr::{get_backend, PhotoSearch};
use crate::server::routes::StatusResponse;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Check a specific backend
    #[arg(long, short = 'b')]
    pub backend: Option<String>,

    /// Check if the server is running (tries to connect)
    #[arg(long)]
    pub server: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;

    println!("photo-wander v{}", env!("CARGO_PKG_VERSION"));
    println!();

    // Backend info
    let backend_name = args
        .backend
        .unwrap_or_else(|| config.defaults.backend.clone());
    let backend = get_backend(&backend_name, Some(&config.api_keys.flickr));
    println!("Backend: {} ({})", backend.name(), backend.description());

    // Search policy summary
    println!("Radius: {}km", config.defaults.radius_km);
    println!("Results per search: {}", config.defaults.per_page);
    println!("Throttle window: {}s", config.throttle.interval_secs);

    if config.api_keys.flickr.is_empty() {
        println!("Flickr API key: not set (set with `photo-wander config api_keys.flickr <key>`)");
    } else {
        println!("Flickr API key: set");
    }

    // Check server status if requested
    if args.server {
        println!();
        check_server_status(&config).await;
    }

    Ok(())
}

/// Probe a locally running server
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/api/status", config.server_addr());

    let client = match reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(2))
        .build()
    {
        Ok(client) => client,
        Err(_) => {
            println!("Server: check failed (could not build HTTP client)");
            return;
        }
    };

    match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => {
            match response.json::<StatusResponse>().await {
                Ok(status) => {
                    println!("Server: running v{} at {}", status.version, config.server_addr());
                    println!("  Backend: {}", status.backend);
                    println!("  Feed size: {}", status.feed_size);
                    println!("  Next update allowed: {}", status.next_allowed);
                }
                Err(_) => println!("Server: responded but status was unreadable"),
            }
        }
        _ => {
            println!("Server: not running at {}", config.server_addr());
        }
    }
}

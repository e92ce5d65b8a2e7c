//! photo-wander CLI entry point
//!
//! Location-triggered photo discovery - CLI + web app

use photo_wander::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! Search command handler
//!
//! Runs a one-shot photo search around a coordinate and prints the result.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::flickr::{available_backends, get_backend, PhotoSearch, SearchReport};
use crate::format::{available_formats, get_formatter};
use crate::location::ip::IpLocator;
use crate::location::Coordinate;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Latitude
    #[arg(long)]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long)]
    pub lng: Option<f64>,

    /// Use current location (IP geolocation)
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub here: bool,

    /// Search radius in kilometers
    #[arg(long, short = 'r')]
    pub radius: Option<f64>,

    /// Search backend
    #[arg(long, short = 'b')]
    pub backend: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available backends
    #[arg(short = 'B', long = "list-backends")]
    pub list_backends: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    // Handle list flags first
    if args.list_backends {
        list_backends();
        return Ok(());
    }

    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;

    // Determine location
    let center = resolve_center(&args, &config).await?;

    // Build the backend and parameters
    let backend_name = args
        .backend
        .unwrap_or_else(|| config.defaults.backend.clone());
    let backend = get_backend(&backend_name, Some(&config.api_keys.flickr));

    let mut params = config.search_params();
    if let Some(radius) = args.radius {
        params.radius_km = radius;
    }

    let urls = backend.search(center, &params).await?;

    let report = SearchReport {
        center,
        radius_km: params.radius_km,
        backend: backend.name().to_string(),
        urls,
    };

    // Format and emit
    let format_name = args.format.unwrap_or_else(|| config.defaults.format.clone());
    let formatter = get_formatter(&format_name)
        .ok_or_else(|| Error::Config(format!("Unknown output format: {}", format_name)))?;

    let output = formatter.format(&report)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, output)?;
            eprintln!("Output written to {}", path);
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// Resolve the search center from arguments and config
async fn resolve_center(args: &SearchArgs, config: &Config) -> Result<Coordinate> {
    if args.here {
        return locate_here().await;
    }

    if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        let center = Coordinate::new(lat, lng);
        center.validate()?;
        return Ok(center);
    }

    if config.location.default_here {
        return locate_here().await;
    }

    eprintln!("Error: provide --lat and --lng, or use --here");
    std::process::exit(1);
}

async fn locate_here() -> Result<Coordinate> {
    let location = IpLocator::new().locate().await?;
    eprintln!("Using IP location: {}", location.display_name);
    Ok(location.coordinate)
}

fn list_backends() {
    println!("Available backends:");
    for backend in available_backends() {
        println!("  {} - {}", backend.name, backend.description);
    }
}

fn list_formats() {
    println!("Available formats:");
    for format in available_formats() {
        println!("  {} - {}", format.name, format.description);
    }
}

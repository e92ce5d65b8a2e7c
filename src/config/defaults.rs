//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default photo search backend
pub const DEFAULT_BACKEND: &str = "flickr";

/// Default search radius in kilometers
pub const DEFAULT_RADIUS_KM: f64 = 1.0;

/// Default maximum results per search
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Default geo accuracy level (16 is street level, the highest Flickr allows)
pub const DEFAULT_ACCURACY: u8 = 16;

/// Default minimum taken-date floor for search results
pub const DEFAULT_MIN_TAKEN_DATE: &str = "2010-01-01 00:00:01";

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default minimum interval between accepted location events, in seconds
pub const DEFAULT_THROTTLE_INTERVAL_SECS: u64 = 20;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8676;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "photo-wander";

//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/photo-wander/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::flickr::SearchParams;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default values for searching
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Throttle settings
    #[serde(default)]
    pub throttle: ThrottleConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Location settings
    #[serde(default)]
    pub location: LocationConfig,

    /// API keys for various services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Default values for searching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default photo search backend
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Default search radius in kilometers
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,

    /// Maximum results per search
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Geo accuracy level
    #[serde(default = "default_accuracy")]
    pub accuracy: u8,

    /// Oldest allowed taken-date for results
    #[serde(default = "default_min_taken_date")]
    pub min_taken_date: String,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Throttle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Minimum interval between accepted location events, in seconds
    #[serde(default = "default_throttle_interval")]
    pub interval_secs: u64,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Location settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocationConfig {
    /// If true, IP geolocation is the default when no location is given
    #[serde(default)]
    pub default_here: bool,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// Flickr API key
    #[serde(default)]
    pub flickr: String,
}

// Default value functions for serde
fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}
fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}
fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}
fn default_accuracy() -> u8 {
    DEFAULT_ACCURACY
}
fn default_min_taken_date() -> String {
    DEFAULT_MIN_TAKEN_DATE.to_string()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_throttle_interval() -> u64 {
    DEFAULT_THROTTLE_INTERVAL_SECS
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            radius_km: default_radius_km(),
            per_page: default_per_page(),
            accuracy: default_accuracy(),
            min_taken_date: default_min_taken_date(),
            format: default_format(),
        }
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_throttle_interval(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "backend"] => Some(self.defaults.backend.clone()),
            ["defaults", "radius_km"] => Some(self.defaults.radius_km.to_string()),
            ["defaults", "per_page"] => Some(self.defaults.per_page.to_string()),
            ["defaults", "accuracy"] => Some(self.defaults.accuracy.to_string()),
            ["defaults", "min_taken_date"] => Some(self.defaults.min_taken_date.clone()),
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["throttle", "interval_secs"] => Some(self.throttle.interval_secs.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["location", "default_here"] => Some(self.location.default_here.to_string()),

            ["api_keys", "flickr"] => Some(self.api_keys.flickr.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "backend"] => {
                self.defaults.backend = value.to_string();
            }
            ["defaults", "radius_km"] => {
                self.defaults.radius_km = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid radius value: {}", value)))?;
            }
            ["defaults", "per_page"] => {
                self.defaults.per_page = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid per_page value: {}", value)))?;
            }
            ["defaults", "accuracy"] => {
                self.defaults.accuracy = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid accuracy value: {}", value)))?;
            }
            ["defaults", "min_taken_date"] => {
                self.defaults.min_taken_date = value.to_string();
            }
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }

            ["throttle", "interval_secs"] => {
                self.throttle.interval_secs = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid interval value: {}", value)))?;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }

            ["location", "default_here"] => {
                self.location.default_here = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid boolean value: {}", value)))?;
            }

            ["api_keys", "flickr"] => {
                self.api_keys.flickr = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.backend",
            "defaults.radius_km",
            "defaults.per_page",
            "defaults.accuracy",
            "defaults.min_taken_date",
            "defaults.format",
            "throttle.interval_secs",
            "server.host",
            "server.port",
            "location.default_here",
            "api_keys.flickr",
        ]
    }

    /// Build search parameters from the configured defaults
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            radius_km: self.defaults.radius_km,
            per_page: self.defaults.per_page,
            accuracy: self.defaults.accuracy,
            min_taken_date: self.defaults.min_taken_date.clone(),
            ..SearchParams::default()
        }
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

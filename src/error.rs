//! Error types for photo-wander

use thiserror::Error;

/// Main error type for photo-wander operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Location error: {0}")]
    Location(String),
}

/// Result type alias for photo-wander operations
pub type Result<T> = std::result::Result<T, Error>;

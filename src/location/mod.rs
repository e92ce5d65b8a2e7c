//! Location events
//!
//! Defines the coordinate value type and the timestamped location events that
//! drive photo discovery. Events come from an external provider (the `ip`
//! module ships one); the pipeline only consumes them.

pub mod ip;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Create a new coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that the coordinate is within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.lat < -90.0 || self.lat > 90.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if self.lng < -180.0 || self.lng > 180.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

/// A location fix delivered by a provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationEvent {
    pub coordinate: Coordinate,

    /// When the fix was taken
    pub at: DateTime<Utc>,
}

impl LocationEvent {
    /// Create an event with an explicit timestamp
    pub fn new(coordinate: Coordinate, at: DateTime<Utc>) -> Self {
        Self { coordinate, at }
    }

    /// Create an event stamped with the current time
    pub fn now(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            at: Utc::now(),
        }
    }
}

/// Pick the event to act on from a provider batch
///
/// Providers may deliver several fixes at once; only the most recent one is
/// worth searching around, so everything but the last entry is ignored.
pub fn latest(events: &[LocationEvent]) -> Option<&LocationEvent> {
    events.last()
}

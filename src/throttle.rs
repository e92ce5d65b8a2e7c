//! Location update throttling
//!
//! Rate-limits how often location events may trigger a photo search, both to
//! skip spurious fixes and to stay clear of Flickr API rate limits. The state
//! is a single "next allowed" timestamp; there is one logical caller, so no
//! internal locking.

use chrono::{DateTime, Duration, Utc};

/// Default minimum interval between accepted events
pub const DEFAULT_INTERVAL_SECS: i64 = 20;

/// Throttle over a stream of timestamped events
///
/// An event is accepted only when its timestamp is strictly past the
/// `next_allowed` mark; ties on the exact boundary are rejected. Construction
/// sets `next_allowed` to the given instant, so an event stamped at or before
/// the construction time is rejected while anything later is accepted.
#[derive(Debug, Clone)]
pub struct UpdateThrottle {
    window: Duration,
    next_allowed: DateTime<Utc>,
}

impl UpdateThrottle {
    /// Create a throttle with the given minimum interval
    pub fn new(window: Duration, now: DateTime<Utc>) -> Self {
        Self {
            window,
            next_allowed: now,
        }
    }

    /// Create a throttle with the default 20 second window
    pub fn with_default_window(now: DateTime<Utc>) -> Self {
        Self::new(Duration::seconds(DEFAULT_INTERVAL_SECS), now)
    }

    /// Whether an event at `now` may trigger a search
    pub fn should_accept(&self, now: DateTime<Utc>) -> bool {
        now > self.next_allowed
    }

    /// Record that an event at `now` was accepted
    ///
    /// The next event will only be accepted strictly after `now + window`.
    pub fn record_accepted(&mut self, now: DateTime<Utc>) {
        self.next_allowed = now + self.window;
    }

    /// The earliest instant after which an event will be accepted
    pub fn next_allowed(&self) -> DateTime<Utc> {
        self.next_allowed
    }

    /// The configured minimum interval
    pub fn window(&self) -> Duration {
        self.window
    }
}

//! Photo feed storage
//!
//! An ordered, newest-first sequence of photo URLs representing the
//! user-visible feed. The insertion policy prefers URLs not yet in the feed
//! but always inserts something on a successful search, so the feed visibly
//! advances even when every candidate is a repeat.

use crate::flickr::PhotoUrl;

/// Ordered photo feed, newest first
#[derive(Debug, Clone, Default)]
pub struct FeedStore {
    urls: Vec<PhotoUrl>,
}

impl FeedStore {
    /// Create an empty feed
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one candidate into the feed, newest first
    ///
    /// Scans `candidates` in order and inserts the first URL not already
    /// present anywhere in the feed, then stops; at most one URL is inserted
    /// per call. When every candidate is already present, `candidates[0]` is
    /// inserted anyway so a successful search always advances the feed. An
    /// empty candidate list is a no-op.
    ///
    /// Returns the inserted URL, or `None` if nothing was inserted.
    pub fn insert_deduplicated(&mut self, candidates: &[PhotoUrl]) -> Option<PhotoUrl> {
        let first = candidates.first()?;

        let chosen = candidates
            .iter()
            .find(|candidate| !self.contains(candidate))
            .unwrap_or(first)
            .clone();

        self.urls.insert(0, chosen.clone());
        Some(chosen)
    }

    /// Whether the feed already contains `url`
    ///
    /// Linear scan with exact string equality. The feed is display-bounded,
    /// not persisted, so this stays cheap at realistic sizes.
    pub fn contains(&self, url: &PhotoUrl) -> bool {
        self.urls.iter().any(|u| u == url)
    }

    /// All URLs, newest first
    pub fn urls(&self) -> &[PhotoUrl] {
        &self.urls
    }

    /// The most recently inserted URL
    pub fn front(&self) -> Option<&PhotoUrl> {
        self.urls.first()
    }

    /// Number of URLs in the feed
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether the feed is empty
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Remove every URL from the feed
    pub fn clear(&mut self) {
        self.urls.clear();
    }
}

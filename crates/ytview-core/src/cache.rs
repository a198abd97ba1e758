//! Finished-video cache keyed by video ID.
//!
//! Replaces an ambient session store: the caller owns a `ResultCache`, passes
//! it to the watch flow, and decides when to evict.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// What the presentation layer needs to show a finished video again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedVideo {
    pub artifact_url: String,
    pub title: String,
    pub thumbnail: String,
}

#[derive(Debug, Default)]
pub struct ResultCache {
    entries: RwLock<HashMap<String, CachedVideo>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, video_id: &str) -> Option<CachedVideo> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(video_id)
            .cloned()
    }

    /// Stores a finished video, replacing any previous entry for the same ID.
    pub fn insert(&self, video_id: &str, video: CachedVideo) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(video_id.to_string(), video);
    }

    pub fn remove(&self, video_id: &str) -> Option<CachedVideo> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(video_id)
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

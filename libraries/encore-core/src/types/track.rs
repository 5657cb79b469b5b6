/// Track domain types
use crate::types::RequesterId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playable candidate returned by a search provider
///
/// Has everything a `Track` has except the requester, which is attached at
/// resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Track title
    pub title: String,

    /// Author / uploader name
    pub author: String,

    /// Track duration in milliseconds
    pub duration_ms: u64,

    /// Opaque handle the audio backend understands
    pub play_uri: String,

    /// Public link to the track, when the source has one
    pub source_uri: Option<String>,

    /// Artwork URL
    pub artwork_uri: Option<String>,
}

impl TrackInfo {
    /// Create a candidate with minimal metadata
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        duration_ms: u64,
        play_uri: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            duration_ms,
            play_uri: play_uri.into(),
            source_uri: None,
            artwork_uri: None,
        }
    }

    /// Set the public link
    #[must_use]
    pub fn with_source_uri(mut self, uri: impl Into<String>) -> Self {
        self.source_uri = Some(uri.into());
        self
    }

    /// Set the artwork URL
    #[must_use]
    pub fn with_artwork(mut self, uri: impl Into<String>) -> Self {
        self.artwork_uri = Some(uri.into());
        self
    }
}

/// Resolved, playable track
///
/// Immutable once built. Ownership moves between a session's queue, current
/// and previous slots; nothing edits a track in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    info: TrackInfo,
    requester: RequesterId,
}

impl Track {
    /// Attach a requester to a resolved candidate
    pub fn new(info: TrackInfo, requester: RequesterId) -> Self {
        Self { info, requester }
    }

    /// Track title
    pub fn title(&self) -> &str {
        &self.info.title
    }

    /// Author / uploader name
    pub fn author(&self) -> &str {
        &self.info.author
    }

    /// Duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.info.duration_ms
    }

    /// Duration as a `Duration`
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.info.duration_ms)
    }

    /// Backend handle
    pub fn play_uri(&self) -> &str {
        &self.info.play_uri
    }

    /// Public link
    pub fn source_uri(&self) -> Option<&str> {
        self.info.source_uri.as_deref()
    }

    /// Artwork URL
    pub fn artwork_uri(&self) -> Option<&str> {
        self.info.artwork_uri.as_deref()
    }

    /// Who queued this track
    pub fn requester(&self) -> RequesterId {
        self.requester
    }

    /// Underlying candidate metadata
    pub fn info(&self) -> &TrackInfo {
        &self.info
    }
}

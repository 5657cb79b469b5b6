//! Collaborator traits
//!
//! The playback core never talks to a voice transport or a metadata service directly.
//! Everything outside the process is reached through these traits, so tests can swap in
//! fakes and applications can plug in real clients.

use crate::error::Result;
use crate::types::{Lyrics, PlayId, PlaylistItem, SearchSource, Track, TrackInfo};
use async_trait::async_trait;

/// Audio rendering backend bound to one community's voice connection
///
/// The backend decodes and streams audio; the core only tells it what to do.
/// Completion events travel the other way: the backend (or the glue around it) reports
/// them to `SessionRegistry::handle_track_end`, exactly once per track end.
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Whether a track is currently loaded in the player (paused counts as playing)
    fn is_playing(&self) -> bool;

    /// Start playing `track`, replacing whatever was loaded
    ///
    /// The backend reports the end of this play with the same `play` id in its `TrackEnd`.
    ///
    /// # Errors
    /// Returns `EncoreError::Backend` if the player did not accept the track
    async fn play(&self, track: &Track, play: PlayId) -> Result<()>;

    /// Stop the loaded track without leaving the voice channel
    async fn stop(&self) -> Result<()>;

    /// Pause (`true`) or resume (`false`) the loaded track
    async fn pause(&self, paused: bool) -> Result<()>;

    /// Set output volume in percent (1..=1000)
    async fn set_volume(&self, percent: u16) -> Result<()>;

    /// Stop playback and leave the voice channel
    async fn disconnect(&self) -> Result<()>;
}

/// Track search service, queried per source tier
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search `query` on the given source
    ///
    /// Candidates are returned in the provider's ranking order; an empty list means
    /// the source had nothing for this query.
    async fn search(&self, source: SearchSource, query: &str) -> Result<Vec<TrackInfo>>;

    /// Whether the provider is currently reachable
    async fn is_available(&self) -> bool;
}

/// Playlist listing service
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait PlaylistProvider: Send + Sync {
    /// Extract the playlist identifier from a link, if the link is one of ours
    fn playlist_id(&self, query: &str) -> Option<String>;

    /// List the playlist's items in provider order
    async fn list_items(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>>;
}

/// Lyrics lookup service
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    /// Find lyrics for a song, `None` if the service has no match
    async fn search(&self, title: &str, author: &str) -> Result<Option<Lyrics>>;
}

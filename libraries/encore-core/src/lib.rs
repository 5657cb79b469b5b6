//! Encore Core
//!
//! Shared building blocks for the Encore voice-channel music player.
//!
//! This crate defines:
//! - **Domain Types**: `Track`, `TrackInfo`, `CommunityId`, `RequesterId`, `PlayId`, `TrackEnd`
//! - **Collaborator Traits**: `AudioBackend`, `SearchProvider`, `PlaylistProvider`, `LyricsProvider`
//! - **Error Handling**: `EncoreError` and `Result`
//!
//! Nothing in here talks to the network. The traits are the narrow seams through which
//! the playback core reaches the audio renderer and the metadata services.
//!
//! # Example
//!
//! ```rust
//! use encore_core::{RequesterId, Track, TrackInfo};
//!
//! let info = TrackInfo::new("Song", "Artist", 183_000, "encoded-handle");
//! let track = Track::new(info, RequesterId::new(42));
//!
//! assert_eq!(track.title(), "Song");
//! assert_eq!(track.requester(), RequesterId::new(42));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{EncoreError, Result};
pub use traits::{AudioBackend, LyricsProvider, PlaylistProvider, SearchProvider};
pub use types::{
    CommunityId, EndReason, Lyrics, PlayId, PlaylistItem, RequesterId, SearchSource, Track,
    TrackEnd, TrackInfo,
};

#[cfg(feature = "mocks")]
pub use traits::{MockAudioBackend, MockLyricsProvider, MockPlaylistProvider, MockSearchProvider};

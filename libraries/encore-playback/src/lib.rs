//! Encore - Playback Sessions
//!
//! Per-community playback state and the rules that move it forward.
//!
//! This crate provides:
//! - `PlaybackSession`: queue / current / previous / loop state for one community
//! - Transition engine: what plays next on natural completion or skip
//! - `SessionRegistry`: one live session per community, atomic get-or-create
//! - Status views (now playing, paged queue) and lyrics lookup for the current track
//! - `Jukebox`: the resolve → session → enqueue flow behind a play request
//!
//! # Architecture
//!
//! `encore-playback` never talks to a voice transport or a web API directly:
//! - Audio rendering goes through `encore_core::AudioBackend`
//! - Searches and playlists go through `encore_resolver::Resolver`
//! - Completion events come in through `SessionRegistry::handle_track_end`
//!
//! Every mutating session operation runs under the session's mutex, backend calls
//! included, so a "track finished" event and a user command never interleave.
//!
//! # Example
//!
//! ```rust,no_run
//! use encore_core::{AudioBackend, CommunityId, EndReason, TrackEnd};
//! use encore_playback::{SessionConfig, SessionRegistry, Transition};
//! use std::sync::Arc;
//!
//! # async fn demo(backend: Arc<dyn AudioBackend>) -> encore_playback::Result<()> {
//! let registry = SessionRegistry::new(SessionConfig::default());
//! let community = CommunityId::new(1);
//!
//! let session = registry.get_or_create(community, backend).await;
//! session.toggle_loop().await?;
//!
//! // Backend reported that the current track played to the end
//! let end = TrackEnd::with_reason(EndReason::Finished);
//! let transition = registry.handle_track_end(community, &end).await?;
//! assert!(matches!(transition, Transition::Replayed(_) | Transition::Drained));
//!
//! registry.stop(community).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod jukebox;
mod lyrics;
mod queue;
mod registry;
mod session;
mod shuffle;
mod state;
pub mod status;
mod transition;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use jukebox::{Jukebox, PlayOutcome};
pub use lyrics::{lyrics_for_current, truncate_lyrics, LyricsLookup, DEFAULT_LYRICS_MAX_CHARS};
pub use queue::Queue;
pub use registry::SessionRegistry;
pub use session::{EnqueueReport, PlaybackSession};
pub use status::{format_duration, NowPlaying, QueueEntry, QueueView, SessionSnapshot};
pub use transition::Transition;
pub use types::{SessionConfig, SessionStatus, MAX_VOLUME, MIN_VOLUME};

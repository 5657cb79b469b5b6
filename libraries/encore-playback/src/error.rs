//! Error types for playback sessions

use encore_core::{CommunityId, EncoreError};
use encore_resolver::ResolveError;
use thiserror::Error;

/// Playback errors
///
/// All of these are recoverable at the command boundary. None of them leaves a session
/// half-updated: an operation that fails reports the error with the session unchanged.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Query resolved to nothing playable
    #[error("No playable results")]
    NoResults,

    /// 1-based queue position outside the queue
    #[error("Position {position} is out of range (queue has {len} tracks)")]
    OutOfRange { position: usize, len: usize },

    /// Go-back with no previous track
    #[error("No previous track to go back to")]
    NothingToReverse,

    /// Audio backend did not accept a control call
    #[error("Audio backend unavailable: {0}")]
    BackendUnavailable(String),

    /// No live session for the community
    #[error("No playback session for community {0}")]
    SessionNotFound(CommunityId),

    /// Playlist could not be resolved
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Lyrics provider failed
    #[error("Provider error: {0}")]
    Provider(EncoreError),
}

impl PlaybackError {
    /// Wrap a backend failure
    pub(crate) fn backend(err: EncoreError) -> Self {
        Self::BackendUnavailable(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

//! Error types for track resolution

use encore_core::EncoreError;
use thiserror::Error;

/// Resolution errors
///
/// Per-item search failures inside a playlist never show up here; they are logged and the
/// item is dropped. Only failures that make the whole request meaningless are reported.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Playlist provider could not list the playlist
    #[error("Playlist lookup failed: {0}")]
    Provider(#[from] EncoreError),

    /// Query looked like a playlist link but carried no usable identifier
    #[error("Invalid playlist link: {0}")]
    InvalidPlaylistUrl(String),
}

/// Result type for resolution
pub type Result<T> = std::result::Result<T, ResolveError>;

//! Encore Providers
//!
//! HTTP adapters that plug real services into the `encore-core` traits.
//!
//! # Features
//!
//! - **Lavalink**: v4 `loadtracks` search and a `/version` liveness probe (`SearchProvider`)
//! - **Spotify**: client-credentials playlist listing with pagination (`PlaylistProvider`)
//! - **Lyrics**: lyrics.ovh-style lookup by artist and title (`LyricsProvider`)
//!
//! # Example
//!
//! ```ignore
//! use encore_providers::{LavalinkClient, LavalinkConfig, SpotifyClient, SpotifyConfig};
//! use encore_resolver::Resolver;
//! use std::sync::Arc;
//!
//! let search = Arc::new(LavalinkClient::new(&LavalinkConfig::default())?);
//! let spotify = Arc::new(SpotifyClient::new(SpotifyConfig::new("id", "secret"))?);
//! let resolver = Resolver::new(search).with_playlists(spotify);
//!
//! let tracks = resolver.resolve("daft punk one more time", requester).await?;
//! ```

mod error;
mod http;
mod lavalink;
mod lyrics;
mod spotify;

pub use error::{ProviderError, Result};
pub use lavalink::{LavalinkClient, LavalinkConfig};
pub use lyrics::{LyricsClient, DEFAULT_LYRICS_URL};
pub use spotify::{parse_playlist_id, SpotifyClient, SpotifyConfig};

//! Encore CLI
//!
//! Wires the playback core to real providers: configuration, provider construction and
//! a dry-run audio backend for exercising sessions without a voice connection.

pub mod config;
pub mod dry_run;
pub mod error;

use crate::config::EncoreConfig;
use crate::error::Result;
use encore_core::Lyrics;
use encore_playback::truncate_lyrics;
use encore_providers::{LavalinkClient, LyricsClient, SpotifyClient};
use encore_resolver::Resolver;
use std::sync::Arc;
use tracing::{info, warn};

/// Lavalink search plus Spotify playlists when credentials are configured
pub fn build_resolver(config: &EncoreConfig) -> Result<Resolver> {
    let search = Arc::new(LavalinkClient::new(&config.lavalink)?);
    let resolver = Resolver::new(search);

    match config.spotify_config() {
        Some(spotify) => {
            info!("Spotify playlist support enabled");
            Ok(resolver.with_playlists(Arc::new(SpotifyClient::new(spotify)?)))
        }
        None => {
            warn!("Spotify credentials not configured, playlist links will be searched as text");
            Ok(resolver)
        }
    }
}

/// Lyrics client for the configured service
pub fn build_lyrics(config: &EncoreConfig) -> Result<LyricsClient> {
    Ok(LyricsClient::new(&config.lyrics.url)?)
}

/// Lyrics for a song, cut to the configured length
pub async fn find_lyrics(
    config: &EncoreConfig,
    title: &str,
    author: &str,
) -> Result<Option<Lyrics>> {
    let client = build_lyrics(config)?;
    let found = client.lyrics(title, author).await?.map(|text| Lyrics {
        title: title.to_string(),
        text,
    });
    Ok(found.map(|lyrics| truncate_lyrics(lyrics, config.playback.lyrics_max_chars)))
}

/// Version reported by the configured Lavalink node
pub async fn lavalink_version(config: &EncoreConfig) -> Result<String> {
    let client = LavalinkClient::new(&config.lavalink)?;
    Ok(client.version().await?)
}

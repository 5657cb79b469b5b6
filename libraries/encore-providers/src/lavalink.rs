//! Lavalink v4 REST search.
//!
//! Only the track loading endpoint is used here. Voice connections and player control go
//! through the `AudioBackend` implementation of whatever gateway glue hosts the bot.

use crate::error::{ProviderError, Result};
use crate::http::{build_client, parse_base_url, read_json};
use async_trait::async_trait;
use encore_core::{SearchProvider, SearchSource, TrackInfo};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Connection settings for a Lavalink node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LavalinkConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
    /// Use https instead of http
    pub secure: bool,
}

impl Default for LavalinkConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 2333,
            password: "youshallnotpass".to_string(),
            secure: false,
        }
    }
}

impl LavalinkConfig {
    /// `http(s)://host:port`
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}

// ===== Wire types =====

/// Response of `GET /v4/loadtracks`
#[derive(Debug, Deserialize)]
#[serde(tag = "loadType", content = "data", rename_all = "camelCase")]
enum LoadResult {
    Track(LoadedTrack),
    Search(Vec<LoadedTrack>),
    Playlist(LoadedPlaylist),
    Empty(serde_json::Value),
    Error(LoadException),
}

#[derive(Debug, Deserialize)]
struct LoadedTrack {
    encoded: String,
    info: LoadedTrackInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadedTrackInfo {
    title: String,
    author: String,
    length: u64,
    uri: Option<String>,
    artwork_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoadedPlaylist {
    tracks: Vec<LoadedTrack>,
}

#[derive(Debug, Deserialize)]
struct LoadException {
    message: Option<String>,
    severity: Option<String>,
}

impl From<LoadedTrack> for TrackInfo {
    fn from(track: LoadedTrack) -> Self {
        let LoadedTrackInfo {
            title,
            author,
            length,
            uri,
            artwork_url,
        } = track.info;

        let mut info = TrackInfo::new(title, author, length, track.encoded);
        if let Some(uri) = uri {
            info = info.with_source_uri(uri);
        }
        if let Some(artwork) = artwork_url {
            info = info.with_artwork(artwork);
        }
        info
    }
}

// ===== Client =====

/// Search client for one Lavalink node
#[derive(Debug, Clone)]
pub struct LavalinkClient {
    http: Client,
    base_url: String,
    password: String,
}

impl LavalinkClient {
    /// Create a client for the node described by `config`.
    pub fn new(config: &LavalinkConfig) -> Result<Self> {
        let base = parse_base_url(&config.base_url())?;
        Ok(Self {
            http: build_client()?,
            base_url: base.as_str().trim_end_matches('/').to_string(),
            password: config.password.clone(),
        })
    }

    /// Node base URL
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Load `identifier` (a prefixed search or a direct link) and flatten the result
    ///
    /// Single tracks, search hits and playlists all come back as a candidate list;
    /// `empty` is an empty list and `error` is `LoadFailed`.
    pub async fn load_tracks(&self, identifier: &str) -> Result<Vec<TrackInfo>> {
        let url = format!("{}/v4/loadtracks", self.base_url);
        debug!(identifier = %identifier, "Loading tracks");

        let response = self
            .http
            .get(&url)
            .header("Authorization", &self.password)
            .query(&[("identifier", identifier)])
            .send()
            .await?;

        let result: LoadResult = read_json(response).await?;
        match result {
            LoadResult::Track(track) => Ok(vec![track.into()]),
            LoadResult::Search(tracks) => Ok(tracks.into_iter().map(Into::into).collect()),
            LoadResult::Playlist(playlist) => {
                Ok(playlist.tracks.into_iter().map(Into::into).collect())
            }
            LoadResult::Empty(_) => Ok(Vec::new()),
            LoadResult::Error(exception) => {
                let message = exception
                    .message
                    .unwrap_or_else(|| "unknown error".to_string());
                warn!(
                    identifier = %identifier,
                    severity = exception.severity.as_deref().unwrap_or("unknown"),
                    message = %message,
                    "Lavalink failed to load track"
                );
                Err(ProviderError::LoadFailed(message))
            }
        }
    }

    /// Lavalink server version, which doubles as a liveness probe
    pub async fn version(&self) -> Result<String> {
        let url = format!("{}/version", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("Authorization", &self.password)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Server {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.text().await?.trim().to_string())
    }
}

#[async_trait]
impl SearchProvider for LavalinkClient {
    async fn search(&self, source: SearchSource, query: &str) -> encore_core::Result<Vec<TrackInfo>> {
        Ok(self.load_tracks(&source.identifier(query)).await?)
    }

    async fn is_available(&self) -> bool {
        match self.version().await {
            Ok(version) => {
                debug!(url = %self.base_url, version = %version, "Lavalink node is up");
                true
            }
            Err(e) => {
                warn!(url = %self.base_url, error = %e, "Lavalink node unavailable");
                false
            }
        }
    }
}

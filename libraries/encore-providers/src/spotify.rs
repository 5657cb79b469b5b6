//! Spotify Web API playlist listing.
//!
//! Uses the client-credentials flow: no user login, public playlists only. The access
//! token is cached and refreshed shortly before it expires.

use crate::error::{ProviderError, Result};
use crate::http::{build_client, parse_base_url, read_json};
use async_trait::async_trait;
use encore_core::{PlaylistItem, PlaylistProvider};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Refresh the token this long before Spotify says it expires
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Page size requested from the playlist items endpoint (the API maximum)
const PAGE_LIMIT: u32 = 100;

/// Spotify application credentials and endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,

    #[serde(default = "default_accounts_url")]
    pub accounts_url: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_accounts_url() -> String {
    "https://accounts.spotify.com".to_string()
}

fn default_api_url() -> String {
    "https://api.spotify.com".to_string()
}

impl SpotifyConfig {
    /// Credentials for the public Spotify endpoints
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            accounts_url: default_accounts_url(),
            api_url: default_api_url(),
        }
    }

    /// Point both endpoints somewhere else (proxies, tests)
    #[must_use]
    pub fn with_base_urls(mut self, accounts_url: impl Into<String>, api_url: impl Into<String>) -> Self {
        self.accounts_url = accounts_url.into();
        self.api_url = api_url.into();
        self
    }
}

// ===== Wire types =====

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct ItemsPage {
    items: Vec<PlaylistEntry>,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistEntry {
    /// `null` for tracks that were removed from Spotify or are unavailable
    track: Option<SpotifyTrack>,
}

#[derive(Debug, Deserialize)]
struct SpotifyTrack {
    name: String,
    #[serde(default)]
    artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Deserialize)]
struct SpotifyArtist {
    name: String,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

// ===== Playlist links =====

/// Extract the playlist id from an `open.spotify.com/playlist/<id>` link
///
/// Anything after `?` (share tracking parameters) is dropped. Returns `Some("")` for a
/// link with a trailing slash so the caller can reject it as malformed.
pub fn parse_playlist_id(query: &str) -> Option<String> {
    if !query.contains("spotify.com/playlist") {
        return None;
    }

    let last_segment = query.rsplit('/').next().unwrap_or_default();
    let id = last_segment.split('?').next().unwrap_or_default();
    Some(id.to_string())
}

// ===== Client =====

/// Playlist client using the client-credentials flow
#[derive(Debug)]
pub struct SpotifyClient {
    http: Client,
    config: SpotifyConfig,
    token: RwLock<Option<CachedToken>>,
}

impl SpotifyClient {
    /// Create a client; no request is made until the first playlist is listed.
    pub fn new(config: SpotifyConfig) -> Result<Self> {
        if config.client_id.is_empty() || config.client_secret.is_empty() {
            return Err(ProviderError::Auth("client id and secret are required".into()));
        }

        let accounts = parse_base_url(&config.accounts_url)?;
        let api = parse_base_url(&config.api_url)?;
        let config = SpotifyConfig {
            accounts_url: accounts.as_str().trim_end_matches('/').to_string(),
            api_url: api.as_str().trim_end_matches('/').to_string(),
            ..config
        };

        Ok(Self {
            http: build_client()?,
            config,
            token: RwLock::new(None),
        })
    }

    /// Valid access token, fetching a new one if the cached one is missing or stale
    async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.token.read().await.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.value.clone());
            }
        }

        let mut cached = self.token.write().await;
        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.value.clone());
            }
        }

        let url = format!("{}/api/token", self.config.accounts_url);
        debug!(url = %url, "Requesting Spotify access token");

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let token: TokenResponse = match read_json(response).await {
            Err(ProviderError::Server { status: 400, message }) => {
                return Err(ProviderError::Auth(message));
            }
            other => other?,
        };

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        info!(expires_in = token.expires_in, "Obtained Spotify access token");

        Ok(token.access_token)
    }

    async fn forget_token(&self) {
        self.token.write().await.take();
    }

    /// All items of a playlist in playlist order, following pagination
    pub async fn playlist_items(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>> {
        let mut next = Some(format!(
            "{}/v1/playlists/{}/tracks?limit={}",
            self.config.api_url, playlist_id, PAGE_LIMIT
        ));
        let mut items = Vec::new();

        while let Some(url) = next.take() {
            let token = self.access_token().await?;
            let response = self.http.get(&url).bearer_auth(token).send().await?;

            let page: ItemsPage = match read_json(response).await {
                Err(ProviderError::Auth(message)) => {
                    // Token revoked or expired early; the next call fetches a fresh one
                    self.forget_token().await;
                    return Err(ProviderError::Auth(message));
                }
                other => other?,
            };

            for entry in page.items {
                let Some(track) = entry.track else {
                    continue;
                };
                let artist = track
                    .artists
                    .into_iter()
                    .next()
                    .map(|artist| artist.name)
                    .unwrap_or_default();
                items.push(PlaylistItem::new(track.name, artist));
            }

            next = page.next;
        }

        debug!(playlist_id = %playlist_id, count = items.len(), "Listed Spotify playlist");
        Ok(items)
    }
}

#[async_trait]
impl PlaylistProvider for SpotifyClient {
    fn playlist_id(&self, query: &str) -> Option<String> {
        parse_playlist_id(query)
    }

    async fn list_items(&self, playlist_id: &str) -> encore_core::Result<Vec<PlaylistItem>> {
        Ok(self.playlist_items(playlist_id).await?)
    }
}

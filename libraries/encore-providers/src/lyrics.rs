//! Lyrics lookup against a lyrics.ovh-compatible service.

use crate::error::{ProviderError, Result};
use crate::http::{build_client, parse_base_url, read_json};
use async_trait::async_trait;
use encore_core::{Lyrics, LyricsProvider};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Public lyrics.ovh endpoint
pub const DEFAULT_LYRICS_URL: &str = "https://api.lyrics.ovh";

#[derive(Debug, Deserialize)]
struct LyricsResponse {
    lyrics: String,
}

/// Lyrics client: `GET {base}/v1/{artist}/{title}`
#[derive(Debug, Clone)]
pub struct LyricsClient {
    http: Client,
    base_url: Url,
}

impl LyricsClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: build_client()?,
            base_url: parse_base_url(base_url)?,
        })
    }

    fn lookup_url(&self, title: &str, author: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ProviderError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("v1")
            .push(author)
            .push(title);
        Ok(url)
    }

    /// Lyrics text for a song, `None` when the service has no match
    pub async fn lyrics(&self, title: &str, author: &str) -> Result<Option<String>> {
        let url = self.lookup_url(title, author)?;
        debug!(title = %title, author = %author, "Looking up lyrics");

        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: LyricsResponse = read_json(response).await?;
        let text = body.lyrics.trim();
        Ok((!text.is_empty()).then(|| text.to_string()))
    }
}

#[async_trait]
impl LyricsProvider for LyricsClient {
    async fn search(&self, title: &str, author: &str) -> encore_core::Result<Option<Lyrics>> {
        let text = self.lyrics(title, author).await?;
        Ok(text.map(|text| Lyrics {
            title: title.to_string(),
            text,
        }))
    }
}

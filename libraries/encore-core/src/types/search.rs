/// Provider-facing value types
use serde::{Deserialize, Serialize};

/// Search backend tier
///
/// Single-track queries walk `SearchSource::FALLBACK_ORDER` and stop at the first
/// tier that returns a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSource {
    /// Music-scoped search (YouTube Music)
    YouTubeMusic,

    /// General video search (YouTube)
    YouTube,

    /// Raw query handed to the backend as a direct identifier (links, stream URLs)
    Direct,
}

impl SearchSource {
    /// Fixed priority order for single-track resolution
    pub const FALLBACK_ORDER: [SearchSource; 3] =
        [SearchSource::YouTubeMusic, SearchSource::YouTube, SearchSource::Direct];

    /// Identifier prefix understood by the audio backend's loader
    pub fn prefix(self) -> &'static str {
        match self {
            SearchSource::YouTubeMusic => "ytmsearch:",
            SearchSource::YouTube => "ytsearch:",
            SearchSource::Direct => "",
        }
    }

    /// Full loader identifier for `query` on this source
    pub fn identifier(self, query: &str) -> String {
        format!("{}{}", self.prefix(), query)
    }
}

/// One playlist entry as listed by a playlist provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// Song title
    pub title: String,

    /// Primary artist name
    pub artist: String,
}

impl PlaylistItem {
    /// Create a new playlist item
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Search string used to find a playable version of this item
    pub fn search_query(&self) -> String {
        format!("{} {}", self.title, self.artist)
    }
}

/// Lyrics text returned by a lyrics provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lyrics {
    /// Song title as known by the provider
    pub title: String,

    /// Full lyrics text
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_order_is_music_then_video_then_direct() {
        assert_eq!(
            SearchSource::FALLBACK_ORDER,
            [SearchSource::YouTubeMusic, SearchSource::YouTube, SearchSource::Direct]
        );
    }

    #[test]
    fn identifiers_carry_source_prefix() {
        assert_eq!(SearchSource::YouTubeMusic.identifier("abc"), "ytmsearch:abc");
        assert_eq!(SearchSource::YouTube.identifier("abc"), "ytsearch:abc");
        assert_eq!(
            SearchSource::Direct.identifier("https://youtu.be/x"),
            "https://youtu.be/x"
        );
    }

    #[test]
    fn playlist_item_query_is_title_then_artist() {
        let item = PlaylistItem::new("Blue Monday", "New Order");
        assert_eq!(item.search_query(), "Blue Monday New Order");
    }
}

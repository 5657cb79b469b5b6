//! Resolution pipeline

use crate::error::{ResolveError, Result};
use encore_core::{PlaylistProvider, RequesterId, SearchProvider, SearchSource, Track};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What a query asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    /// Playlist link with its extracted identifier
    Playlist(String),

    /// Anything else: a search phrase or a direct track link
    Single,
}

/// Track resolution pipeline
///
/// Holds only shared provider handles; cloning is cheap and every method takes `&self`.
#[derive(Clone)]
pub struct Resolver {
    search: Arc<dyn SearchProvider>,
    playlists: Option<Arc<dyn PlaylistProvider>>,
    playlist_source: SearchSource,
}

impl Resolver {
    /// Create a resolver that only handles single-track queries
    pub fn new(search: Arc<dyn SearchProvider>) -> Self {
        Self {
            search,
            playlists: None,
            playlist_source: SearchSource::YouTubeMusic,
        }
    }

    /// Enable playlist expansion through `playlists`
    #[must_use]
    pub fn with_playlists(mut self, playlists: Arc<dyn PlaylistProvider>) -> Self {
        self.playlists = Some(playlists);
        self
    }

    /// Search tier used for playlist items (default: YouTube Music)
    #[must_use]
    pub fn with_playlist_source(mut self, source: SearchSource) -> Self {
        self.playlist_source = source;
        self
    }

    /// Decide which path a query takes
    pub fn classify(&self, query: &str) -> QueryKind {
        self.playlists
            .as_ref()
            .and_then(|provider| provider.playlist_id(query))
            .map_or(QueryKind::Single, QueryKind::Playlist)
    }

    /// Resolve `query` into playable tracks, each tagged with `requester`
    ///
    /// # Returns
    /// * `Ok(tracks)` - Playlist items that matched, or at most one track for a single query.
    ///   Empty when nothing matched.
    /// * `Err(_)` - The playlist itself could not be listed
    pub async fn resolve(&self, query: &str, requester: RequesterId) -> Result<Vec<Track>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        match self.classify(query) {
            QueryKind::Playlist(id) => self.resolve_playlist(query, &id, requester).await,
            QueryKind::Single => {
                let track = self.resolve_single(query, requester).await;
                Ok(track.into_iter().collect())
            }
        }
    }

    /// First candidate of the first tier that has one
    async fn resolve_single(&self, query: &str, requester: RequesterId) -> Option<Track> {
        for source in SearchSource::FALLBACK_ORDER {
            match self.search.search(source, query).await {
                Ok(candidates) => {
                    if let Some(info) = candidates.into_iter().next() {
                        debug!(
                            query = %query,
                            source = ?source,
                            title = %info.title,
                            "Resolved track"
                        );
                        return Some(Track::new(info, requester));
                    }
                    debug!(query = %query, source = ?source, "No candidates, trying next tier");
                }
                Err(e) => {
                    warn!(query = %query, source = ?source, error = %e, "Search tier failed");
                }
            }
        }

        debug!(query = %query, "No tier returned a candidate");
        None
    }

    async fn resolve_playlist(
        &self,
        query: &str,
        playlist_id: &str,
        requester: RequesterId,
    ) -> Result<Vec<Track>> {
        if playlist_id.is_empty() {
            return Err(ResolveError::InvalidPlaylistUrl(query.to_string()));
        }

        // classify() only yields Playlist when a provider is configured
        let Some(provider) = self.playlists.as_ref() else {
            return Ok(Vec::new());
        };

        let items = provider.list_items(playlist_id).await?;
        let total = items.len();
        let mut tracks = Vec::with_capacity(total);

        for item in items {
            let search = item.search_query();
            match self.search.search(self.playlist_source, &search).await {
                Ok(candidates) => match candidates.into_iter().next() {
                    Some(info) => tracks.push(Track::new(info, requester)),
                    None => debug!(item = %search, "Playlist item has no match, dropping"),
                },
                Err(e) => {
                    warn!(item = %search, error = %e, "Playlist item search failed, dropping");
                }
            }
        }

        info!(
            playlist = %playlist_id,
            resolved = tracks.len(),
            total,
            "Resolved playlist"
        );

        Ok(tracks)
    }
}

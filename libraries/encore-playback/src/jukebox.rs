//! Play-request flow: resolve, find the session, enqueue

use crate::error::{PlaybackError, Result};
use crate::registry::SessionRegistry;
use crate::session::EnqueueReport;
use encore_core::{AudioBackend, CommunityId, RequesterId, Track};
use encore_resolver::Resolver;
use std::sync::Arc;
use tracing::{debug, info};

/// What a play request did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Tracks were handed to the session
    Enqueued {
        /// First resolved track (shown on the "now playing" panel)
        first: Track,

        /// Number of tracks the query resolved to
        total: usize,

        report: EnqueueReport,
    },

    /// Session was stopped while the query was being resolved; nothing was enqueued
    SessionEnded,
}

/// Registry plus resolver, wired the way a `/play` command uses them
#[derive(Clone)]
pub struct Jukebox {
    registry: Arc<SessionRegistry>,
    resolver: Resolver,
}

impl Jukebox {
    pub fn new(registry: Arc<SessionRegistry>, resolver: Resolver) -> Self {
        Self { registry, resolver }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Resolve `query` and feed the result to the community's session
    ///
    /// The session is created (around `backend`) before resolving, and resolution runs
    /// without any lock held. If the session is stopped in the meantime the resolved
    /// tracks are discarded and `SessionEnded` is returned.
    ///
    /// # Errors
    /// `NoResults` when nothing matched, `Resolve` when a playlist could not be listed,
    /// `BackendUnavailable` when the player refused to start.
    pub async fn play(
        &self,
        community: CommunityId,
        query: &str,
        requester: RequesterId,
        backend: Arc<dyn AudioBackend>,
    ) -> Result<PlayOutcome> {
        let session = self.registry.get_or_create(community, backend).await;

        let tracks = self.resolver.resolve(query, requester).await?;
        let Some(first) = tracks.first().cloned() else {
            debug!(community = %community, query = %query, "No playable results");
            return Err(PlaybackError::NoResults);
        };
        let total = tracks.len();

        let still_live = self
            .registry
            .get(community)
            .await
            .is_some_and(|live| Arc::ptr_eq(&live, &session));
        if !still_live {
            info!(community = %community, "Session ended during resolution, dropping tracks");
            return Ok(PlayOutcome::SessionEnded);
        }

        match session.enqueue_or_play(tracks).await {
            Ok(report) => Ok(PlayOutcome::Enqueued {
                first,
                total,
                report,
            }),
            Err(PlaybackError::SessionNotFound(_)) => Ok(PlayOutcome::SessionEnded),
            Err(e) => Err(e),
        }
    }
}

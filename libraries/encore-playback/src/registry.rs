//! Session registry
//!
//! Process-wide map from community to its single live session. Insert happens on demand
//! under the write lock, so two concurrent "first play" requests for one community end up
//! sharing one session. Entries leave only through `stop`; there is no expiry.

use crate::error::{PlaybackError, Result};
use crate::session::PlaybackSession;
use crate::transition::Transition;
use crate::types::SessionConfig;
use encore_core::{AudioBackend, CommunityId, TrackEnd};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Community → session map
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<CommunityId, Arc<PlaybackSession>>>,
    config: SessionConfig,
}

impl SessionRegistry {
    /// Create an empty registry; new sessions use `config`
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Return the live session, creating it around `backend` if there is none
    ///
    /// `backend` is dropped when a live session already exists. A session that was stopped
    /// but not yet removed counts as absent and is replaced.
    pub async fn get_or_create(
        &self,
        community: CommunityId,
        backend: Arc<dyn AudioBackend>,
    ) -> Arc<PlaybackSession> {
        let mut sessions = self.sessions.write().await;

        if let Some(existing) = sessions.get(&community) {
            if !existing.is_closed() {
                return Arc::clone(existing);
            }
        }

        let session = Arc::new(PlaybackSession::new(
            community,
            backend,
            self.config.clone(),
        ));
        sessions.insert(community, Arc::clone(&session));
        info!(community = %community, "Session created");
        session
    }

    /// Live session for `community`
    pub async fn get(&self, community: CommunityId) -> Option<Arc<PlaybackSession>> {
        self.sessions
            .read()
            .await
            .get(&community)
            .filter(|session| !session.is_closed())
            .cloned()
    }

    /// Live session for `community`, or `SessionNotFound`
    pub async fn require(&self, community: CommunityId) -> Result<Arc<PlaybackSession>> {
        self.get(community)
            .await
            .ok_or(PlaybackError::SessionNotFound(community))
    }

    /// Drop the entry without touching the backend
    pub async fn remove(&self, community: CommunityId) -> Option<Arc<PlaybackSession>> {
        self.sessions.write().await.remove(&community)
    }

    /// Disconnect the backend and tear the session down
    ///
    /// # Errors
    /// `SessionNotFound` if there is no live session; `BackendUnavailable` if the backend
    /// refused to disconnect, in which case the session stays registered and usable.
    pub async fn stop(&self, community: CommunityId) -> Result<()> {
        let session = self.require(community).await?;
        session.shutdown().await?;

        let mut sessions = self.sessions.write().await;
        // A fresh session may have replaced the closed one while we were disconnecting
        if sessions
            .get(&community)
            .is_some_and(|current| Arc::ptr_eq(current, &session))
        {
            sessions.remove(&community);
        }
        Ok(())
    }

    /// Route a backend completion event to its session
    ///
    /// Events for communities without a live session are ignored; the session they belonged
    /// to was stopped and has nothing left to advance.
    pub async fn handle_track_end(
        &self,
        community: CommunityId,
        end: &TrackEnd,
    ) -> Result<Transition> {
        let Some(session) = self.get(community).await else {
            debug!(community = %community, reason = %end.reason, "Track end for unknown session");
            return Ok(Transition::Ignored);
        };

        match session.handle_track_end(end).await {
            Err(PlaybackError::SessionNotFound(_)) => Ok(Transition::Ignored),
            other => other,
        }
    }

    /// Number of registered sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no session is registered
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Communities with a registered session
    pub async fn communities(&self) -> Vec<CommunityId> {
        let mut ids: Vec<CommunityId> = self.sessions.read().await.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

//! Playback session - one community's player
//!
//! Every mutating operation takes the session mutex and keeps it until the backend call it
//! makes has returned. That is the serialization point for user commands and completion
//! events alike.

use crate::error::{PlaybackError, Result};
use crate::state::SessionState;
use crate::status::SessionSnapshot;
use crate::transition::{self, Transition};
use crate::types::{clamp_volume, SessionConfig};
use encore_core::{AudioBackend, CommunityId, PlayId, Track, TrackEnd};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Result of handing resolved tracks to a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnqueueReport {
    /// Track that started playing immediately, if the player was idle
    pub started: Option<Track>,

    /// Tracks appended to the queue
    pub queued: usize,
}

/// Live playback state for one community
pub struct PlaybackSession {
    community: CommunityId,
    backend: Arc<dyn AudioBackend>,
    config: SessionConfig,
    state: Mutex<SessionState>,
    closed: AtomicBool,
}

impl std::fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("community", &self.community)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl PlaybackSession {
    /// Create a session bound to `backend`
    pub fn new(
        community: CommunityId,
        backend: Arc<dyn AudioBackend>,
        config: SessionConfig,
    ) -> Self {
        let state = SessionState::new(&config);
        Self {
            community,
            backend,
            config,
            state: Mutex::new(state),
            closed: AtomicBool::new(false),
        }
    }

    /// Community this session belongs to
    pub fn community(&self) -> CommunityId {
        self.community
    }

    /// Whether the session was stopped; a stopped session rejects every operation
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    async fn lock(&self) -> Result<MutexGuard<'_, SessionState>> {
        let guard = self.state.lock().await;
        if self.is_closed() {
            return Err(PlaybackError::SessionNotFound(self.community));
        }
        Ok(guard)
    }

    // ===== Queue operations =====

    /// Play the first track right away if the player is idle, queue the rest in order
    ///
    /// Each track is checked separately: while the backend reports nothing playing the
    /// track becomes current, otherwise it goes to the tail of the queue.
    ///
    /// # Errors
    /// `BackendUnavailable` if `play` was refused. Tracks handled before the failure keep
    /// their place; the refused track and the ones after it are not queued.
    pub async fn enqueue_or_play(&self, tracks: Vec<Track>) -> Result<EnqueueReport> {
        let mut state = self.lock().await?;
        let mut report = EnqueueReport {
            started: None,
            queued: 0,
        };

        for track in tracks {
            if self.backend.is_playing() {
                debug!(community = %self.community, title = %track.title(), "Queued track");
                state.queue.push_back(track);
                report.queued += 1;
            } else {
                let play = state.next_play();
                self.backend
                    .play(&track, play)
                    .await
                    .map_err(PlaybackError::backend)?;
                info!(
                    community = %self.community,
                    title = %track.title(),
                    play = %play,
                    "Now playing"
                );
                state.start(track.clone(), play);
                report.started = Some(track);
            }
        }

        Ok(report)
    }

    /// Completion event from the backend (transition engine entry point)
    pub async fn handle_track_end(&self, end: &TrackEnd) -> Result<Transition> {
        let mut state = self.lock().await?;
        transition::on_track_end(self.community, &mut state, self.backend.as_ref(), end).await
    }

    /// Move to the next queued track now, ignoring loop
    ///
    /// Stops the player when the queue is empty.
    pub async fn skip(&self) -> Result<Transition> {
        let mut state = self.lock().await?;
        transition::skip(self.community, &mut state, self.backend.as_ref()).await
    }

    /// Replay the previous track; the current one goes back to the queue front
    ///
    /// Returns the track that is now current.
    ///
    /// # Errors
    /// `NothingToReverse` when there is no previous track.
    pub async fn go_back(&self) -> Result<Track> {
        let mut state = self.lock().await?;
        let Some(previous) = state.previous.clone() else {
            return Err(PlaybackError::NothingToReverse);
        };

        let play = state.next_play();
        self.backend
            .play(&previous, play)
            .await
            .map_err(PlaybackError::backend)?;

        state.previous = None;
        if let Some(current) = state.current.take() {
            state.queue.push_front(current);
        }
        state.start(previous.clone(), play);

        info!(
            community = %self.community,
            title = %previous.title(),
            "Went back to previous track"
        );
        Ok(previous)
    }

    /// Flip loop mode, returning the new value
    pub async fn toggle_loop(&self) -> Result<bool> {
        let mut state = self.lock().await?;
        state.loop_enabled = !state.loop_enabled;
        debug!(community = %self.community, loop_enabled = state.loop_enabled, "Loop toggled");
        Ok(state.loop_enabled)
    }

    /// Store the autoplay preference
    pub async fn set_autoplay(&self, enabled: bool) -> Result<()> {
        let mut state = self.lock().await?;
        state.autoplay_enabled = enabled;
        Ok(())
    }

    /// Randomly permute the queue; current and previous are untouched
    pub async fn shuffle(&self) -> Result<()> {
        let mut state = self.lock().await?;
        state.queue.shuffle();
        debug!(community = %self.community, len = state.queue.len(), "Queue shuffled");
        Ok(())
    }

    /// Remove the track at 1-based `position` from the queue
    pub async fn remove_at(&self, position: usize) -> Result<Track> {
        let mut state = self.lock().await?;
        let removed = state.queue.remove(position)?;
        debug!(community = %self.community, position, title = %removed.title(), "Removed track");
        Ok(removed)
    }

    // ===== Player controls =====

    /// Pause if playing, resume if paused; returns the new paused state
    pub async fn toggle_pause(&self) -> Result<bool> {
        let mut state = self.lock().await?;
        let paused = !state.paused;
        self.backend
            .pause(paused)
            .await
            .map_err(PlaybackError::backend)?;
        state.paused = paused;
        Ok(paused)
    }

    /// Set output volume, clamped to 1..=1000; returns the applied value
    pub async fn set_volume(&self, percent: u16) -> Result<u16> {
        let mut state = self.lock().await?;
        let volume = clamp_volume(i64::from(percent));
        self.apply_volume(&mut state, volume).await
    }

    /// Change volume by `delta` percent, clamped to 1..=1000
    pub async fn adjust_volume(&self, delta: i32) -> Result<u16> {
        let mut state = self.lock().await?;
        let volume = clamp_volume(i64::from(state.volume) + i64::from(delta));
        self.apply_volume(&mut state, volume).await
    }

    /// Raise volume by the configured step
    pub async fn volume_up(&self) -> Result<u16> {
        self.adjust_volume(i32::from(self.config.volume_step)).await
    }

    /// Lower volume by the configured step
    pub async fn volume_down(&self) -> Result<u16> {
        self.adjust_volume(-i32::from(self.config.volume_step)).await
    }

    async fn apply_volume(&self, state: &mut SessionState, volume: u16) -> Result<u16> {
        self.backend
            .set_volume(volume)
            .await
            .map_err(PlaybackError::backend)?;
        state.volume = volume;
        Ok(volume)
    }

    /// Disconnect the backend and close the session
    ///
    /// Called by the registry, which then drops its entry. Operations already waiting on
    /// the lock see `SessionNotFound` once they get it.
    pub(crate) async fn shutdown(&self) -> Result<()> {
        let mut state = self.lock().await?;
        self.backend
            .disconnect()
            .await
            .map_err(PlaybackError::backend)?;

        *state = SessionState::new(&self.config);
        self.closed.store(true, Ordering::Release);
        info!(community = %self.community, "Session stopped");
        Ok(())
    }

    // ===== Accessors =====

    /// Copy of the whole session state
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        Ok(self.lock().await?.snapshot())
    }

    /// Track being played
    pub async fn current(&self) -> Result<Option<Track>> {
        Ok(self.lock().await?.current.clone())
    }

    /// Id of the play behind the current track, as handed to the backend
    pub async fn current_play(&self) -> Result<Option<PlayId>> {
        Ok(self.lock().await?.current_play)
    }

    /// Most recently superseded track
    pub async fn previous(&self) -> Result<Option<Track>> {
        Ok(self.lock().await?.previous.clone())
    }

    /// Upcoming tracks, front first
    pub async fn queue(&self) -> Result<Vec<Track>> {
        Ok(self.lock().await?.queue.to_vec())
    }

    /// Whether loop mode is on
    pub async fn loop_enabled(&self) -> Result<bool> {
        Ok(self.lock().await?.loop_enabled)
    }
}

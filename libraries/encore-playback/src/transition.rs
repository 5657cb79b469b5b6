//! Transition engine
//!
//! The single place that decides what becomes current when a track ends or the user
//! skips. Callers hold the session lock for the whole call, backend awaits included, so a
//! completion event and a command can never interleave their reads and writes.
//!
//! State is committed only after the backend accepted the `play`/`stop` call; a failed
//! call leaves queue, current and previous exactly as they were.

use crate::error::{PlaybackError, Result};
use crate::state::SessionState;
use encore_core::{AudioBackend, CommunityId, Track, TrackEnd};
use tracing::{debug, info, warn};

/// Outcome of a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Event did not move the session (non-natural reason, stale event, nothing to skip)
    Ignored,

    /// Loop is on; the current track was started again
    Replayed(Track),

    /// Queue front became current
    Advanced(Track),

    /// Queue was empty; the session is now idle
    Drained,
}

/// Handle a completion event from the backend
pub(crate) async fn on_track_end(
    community: CommunityId,
    state: &mut SessionState,
    backend: &dyn AudioBackend,
    end: &TrackEnd,
) -> Result<Transition> {
    if !end.reason.is_natural() {
        // Whoever stopped or replaced the track already decided what comes next
        debug!(community = %community, reason = %end.reason, "Ignoring non-natural track end");
        return Ok(Transition::Ignored);
    }

    if let Some(play) = end.play {
        if state.current_play != Some(play) {
            warn!(
                community = %community,
                play = %play,
                "Ignoring completion for a play that is no longer current"
            );
            return Ok(Transition::Ignored);
        }
    }

    if state.loop_enabled {
        if let Some(track) = state.current.clone() {
            let play = state.next_play();
            backend.play(&track, play).await.map_err(PlaybackError::backend)?;
            debug!(community = %community, title = %track.title(), "Looping current track");
            state.start(track.clone(), play);
            return Ok(Transition::Replayed(track));
        }
    }

    advance_queue(community, state, backend).await
}

/// Forced advance requested by the user
///
/// Bypasses loop. With a non-empty queue the front starts playing (the backend reports
/// the old track as replaced, which `on_track_end` ignores). With an empty queue the
/// backend is stopped and the session goes idle.
pub(crate) async fn skip(
    community: CommunityId,
    state: &mut SessionState,
    backend: &dyn AudioBackend,
) -> Result<Transition> {
    if !state.queue.is_empty() {
        return advance_queue(community, state, backend).await;
    }

    if state.current.is_none() {
        return Ok(Transition::Ignored);
    }

    backend.stop().await.map_err(PlaybackError::backend)?;
    state.go_idle();
    info!(community = %community, "Skipped last track, session idle");
    Ok(Transition::Drained)
}

async fn advance_queue(
    community: CommunityId,
    state: &mut SessionState,
    backend: &dyn AudioBackend,
) -> Result<Transition> {
    let Some(next) = state.queue.peek_next() else {
        state.go_idle();
        info!(community = %community, "Queue finished, session idle");
        return Ok(Transition::Drained);
    };

    let play = state.next_play();
    backend.play(next, play).await.map_err(PlaybackError::backend)?;

    let Some(started) = state.queue.pop_next() else {
        return Ok(Transition::Drained);
    };
    state.previous = state.current.take();
    state.start(started.clone(), play);

    info!(community = %community, title = %started.title(), play = %play, "Now playing");
    Ok(Transition::Advanced(started))
}

//! Mutable state owned by one session

use crate::queue::Queue;
use crate::status::SessionSnapshot;
use crate::types::SessionConfig;
use encore_core::{PlayId, Track};

/// Queue / current / previous triple plus the session's flags
///
/// Only reachable through the session's mutex, so every read-modify-write here is
/// serialized against completion events and other commands.
#[derive(Debug, Clone)]
pub(crate) struct SessionState {
    pub queue: Queue,
    pub current: Option<Track>,
    pub previous: Option<Track>,
    /// Id of the play that put `current` on the backend
    pub current_play: Option<PlayId>,
    /// Last id handed to the backend; ids are never reused within a session
    pub last_play: PlayId,
    pub loop_enabled: bool,
    /// Stored and reported, never consulted by transitions
    pub autoplay_enabled: bool,
    pub paused: bool,
    pub volume: u16,
}

impl SessionState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            queue: Queue::new(),
            current: None,
            previous: None,
            current_play: None,
            last_play: PlayId::new(0),
            loop_enabled: false,
            autoplay_enabled: false,
            paused: false,
            volume: crate::types::clamp_volume(i64::from(config.default_volume)),
        }
    }

    /// Id for the next `play` call; becomes current only once the backend accepted it
    pub fn next_play(&self) -> PlayId {
        self.last_play.next()
    }

    /// Record that the backend accepted `play` for `track`
    pub fn start(&mut self, track: Track, play: PlayId) {
        self.last_play = play;
        self.current_play = Some(play);
        self.current = Some(track);
    }

    /// Nothing is loaded on the backend any more
    pub fn go_idle(&mut self) {
        self.current = None;
        self.current_play = None;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            queue: self.queue.to_vec(),
            current: self.current.clone(),
            previous: self.previous.clone(),
            loop_enabled: self.loop_enabled,
            autoplay_enabled: self.autoplay_enabled,
            paused: self.paused,
            volume: self.volume,
        }
    }
}

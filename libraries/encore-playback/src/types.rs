//! Core types for playback sessions

use serde::{Deserialize, Serialize};

/// Lowest volume the backend accepts, in percent
pub const MIN_VOLUME: u16 = 1;

/// Highest volume the backend accepts, in percent
pub const MAX_VOLUME: u16 = 1000;

/// Per-session settings applied when a session is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Initial volume in percent (default: 100)
    pub default_volume: u16,

    /// Step used by volume up/down controls (default: 10)
    pub volume_step: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_volume: 100,
            volume_step: 10,
        }
    }
}

/// What the session is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Nothing is current
    Idle,

    /// A track is current (possibly paused)
    Playing,
}

/// Clamp a requested volume into the accepted range
pub fn clamp_volume(percent: i64) -> u16 {
    percent.clamp(i64::from(MIN_VOLUME), i64::from(MAX_VOLUME)) as u16
}

/// Track completion events reported by the audio backend
use super::ids::PlayId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why a track stopped playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndReason {
    /// Played to the end
    Finished,

    /// Backend could not load the track
    LoadFailed,

    /// Stopped by a control call
    Stopped,

    /// Replaced by another `play` call
    Replaced,

    /// Player was torn down
    Cleanup,
}

impl EndReason {
    /// Whether this is a natural completion, the only reason that moves the queue
    pub fn is_natural(self) -> bool {
        matches!(self, EndReason::Finished)
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EndReason::Finished => "finished",
            EndReason::LoadFailed => "loadFailed",
            EndReason::Stopped => "stopped",
            EndReason::Replaced => "replaced",
            EndReason::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

impl FromStr for EndReason {
    type Err = String;

    /// Parse a backend reason code, ignoring case (`FINISHED`, `finished`, `load_failed`, ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "finished" => Ok(EndReason::Finished),
            "loadfailed" => Ok(EndReason::LoadFailed),
            "stopped" => Ok(EndReason::Stopped),
            "replaced" => Ok(EndReason::Replaced),
            "cleanup" => Ok(EndReason::Cleanup),
            _ => Err(format!("unknown track end reason: {}", s)),
        }
    }
}

/// Completion event for one track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEnd {
    /// Why the track ended
    pub reason: EndReason,

    /// Id the session passed to `AudioBackend::play` for the track that ended
    ///
    /// Used to discard late events for a play that is no longer current.
    pub play: Option<PlayId>,
}

impl TrackEnd {
    /// Natural completion of the given play
    pub fn finished(play: PlayId) -> Self {
        Self {
            reason: EndReason::Finished,
            play: Some(play),
        }
    }

    /// End of the given play for any reason
    pub fn new(reason: EndReason, play: PlayId) -> Self {
        Self {
            reason,
            play: Some(play),
        }
    }

    /// Completion event without a play id
    pub fn with_reason(reason: EndReason) -> Self {
        Self { reason, play: None }
    }
}

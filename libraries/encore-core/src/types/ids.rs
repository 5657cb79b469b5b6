/// ID types for Encore entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Community identifier
///
/// One community (a chat server or room) owns at most one playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommunityId(u64);

impl CommunityId {
    /// Create a new community ID
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CommunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CommunityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Identifier of the user who queued a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequesterId(u64);

impl RequesterId {
    /// Create a new requester ID
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RequesterId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Identity of one `play` call on a session's backend
///
/// Every start of a track gets a fresh id, so two copies of the same song (or a looped
/// replay) are told apart when their completion events arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayId(u64);

impl PlayId {
    /// Create a new play ID
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Id of the play that follows this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for PlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

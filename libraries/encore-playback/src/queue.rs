//! Upcoming-track queue
//!
//! FIFO of tracks waiting to become current. Front = next to play.
//! Positions in the public API are 1-based, matching what users see in queue listings.

use crate::error::{PlaybackError, Result};
use crate::shuffle::shuffle_tracks;
use encore_core::Track;
use std::collections::VecDeque;

/// Upcoming tracks for one session
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: VecDeque<Track>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self {
            tracks: VecDeque::new(),
        }
    }

    /// Append track to the tail
    pub fn push_back(&mut self, track: Track) {
        self.tracks.push_back(track);
    }

    /// Put track in front of everything else (used by go-back)
    pub fn push_front(&mut self, track: Track) {
        self.tracks.push_front(track);
    }

    /// Take the next track to play
    pub fn pop_next(&mut self) -> Option<Track> {
        self.tracks.pop_front()
    }

    /// Peek at next track without removing
    pub fn peek_next(&self) -> Option<&Track> {
        self.tracks.front()
    }

    /// Remove the track at 1-based `position`
    ///
    /// Later tracks shift forward by one; earlier tracks are untouched.
    ///
    /// # Errors
    /// `OutOfRange` if `position` is 0 or past the end; the queue is left unchanged.
    pub fn remove(&mut self, position: usize) -> Result<Track> {
        let len = self.tracks.len();
        if position == 0 || position > len {
            return Err(PlaybackError::OutOfRange { position, len });
        }

        self.tracks
            .remove(position - 1)
            .ok_or(PlaybackError::OutOfRange { position, len })
    }

    /// Randomly permute the queue in place
    pub fn shuffle(&mut self) {
        shuffle_tracks(self.tracks.make_contiguous());
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Get track at 1-based `position`
    pub fn get(&self, position: usize) -> Option<&Track> {
        position.checked_sub(1).and_then(|i| self.tracks.get(i))
    }

    /// Iterate in play order
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Owned copy in play order (for status displays)
    pub fn to_vec(&self) -> Vec<Track> {
        self.tracks.iter().cloned().collect()
    }

    /// Number of tracks waiting
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

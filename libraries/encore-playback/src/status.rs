//! Read-only views for status displays

use crate::types::SessionStatus;
use encore_core::Track;
use serde::{Deserialize, Serialize};

/// Point-in-time copy of a session, taken under the session lock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Upcoming tracks, front first
    pub queue: Vec<Track>,

    /// Track being played
    pub current: Option<Track>,

    /// Most recently superseded current track
    pub previous: Option<Track>,

    /// Replay current track on natural completion
    pub loop_enabled: bool,

    /// Autoplay preference (stored only)
    pub autoplay_enabled: bool,

    /// Backend paused by the user
    pub paused: bool,

    /// Output volume in percent
    pub volume: u16,
}

impl SessionSnapshot {
    /// Idle or playing
    pub fn status(&self) -> SessionStatus {
        if self.current.is_some() {
            SessionStatus::Playing
        } else {
            SessionStatus::Idle
        }
    }

    /// "Now playing" card, `None` when idle
    pub fn now_playing(&self) -> Option<NowPlaying> {
        self.current.as_ref().map(|track| NowPlaying {
            track: track.clone(),
            volume: self.volume,
            paused: self.paused,
            loop_enabled: self.loop_enabled,
        })
    }

    /// First `page_size` queue entries plus how many are hidden
    pub fn queue_view(&self, page_size: usize) -> QueueView {
        let entries = self
            .queue
            .iter()
            .take(page_size)
            .enumerate()
            .map(|(i, track)| QueueEntry {
                position: i + 1,
                track: track.clone(),
            })
            .collect();

        QueueView {
            entries,
            remaining: self.queue.len().saturating_sub(page_size),
        }
    }
}

/// Current track with the player settings shown next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub track: Track,
    pub volume: u16,
    pub paused: bool,
    pub loop_enabled: bool,
}

impl NowPlaying {
    /// Formatted track length
    pub fn duration_label(&self) -> String {
        format_duration(self.track.duration_ms())
    }
}

/// One numbered queue line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// 1-based position, as accepted by `remove_at`
    pub position: usize,
    pub track: Track,
}

/// One page of the queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueView {
    pub entries: Vec<QueueEntry>,

    /// Tracks after the page
    pub remaining: usize,
}

impl QueueView {
    /// Whether there is nothing to list
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `"1. Title - Author"` lines, plus an `"And N more..."` footer when truncated
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .map(|entry| {
                format!(
                    "{}. {} - {}",
                    entry.position,
                    entry.track.title(),
                    entry.track.author()
                )
            })
            .collect();

        if self.remaining > 0 {
            lines.push(format!("And {} more...", self.remaining));
        }
        lines
    }
}

/// Format milliseconds as `"{minutes}m {seconds}s"`
pub fn format_duration(duration_ms: u64) -> String {
    format!("{}m {}s", duration_ms / 60_000, (duration_ms / 1000) % 60)
}

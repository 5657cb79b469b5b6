//! Shared fakes for playback tests

#![allow(dead_code)]

use async_trait::async_trait;
use encore_core::{
    AudioBackend, EncoreError, PlayId, RequesterId, SearchProvider, SearchSource, Track, TrackEnd,
    TrackInfo,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Control call recorded by `FakeBackend`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Play(String),
    Stop,
    Pause(bool),
    Volume(u16),
    Disconnect,
}

/// In-memory audio backend that records every call
///
/// `play` yields once before returning so concurrent tasks get a chance to interleave,
/// the way they would around a real network round trip.
#[derive(Default)]
pub struct FakeBackend {
    playing: AtomicBool,
    failing: AtomicBool,
    calls: Mutex<Vec<BackendCall>>,
    plays: Mutex<Vec<PlayId>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every following control call fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Simulate the current track running out on the node
    pub fn set_idle(&self) {
        self.playing.store(false, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn played(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BackendCall::Play(uri) => Some(uri),
                _ => None,
            })
            .collect()
    }

    /// Play ids in the order the backend accepted them
    pub fn play_ids(&self) -> Vec<PlayId> {
        self.plays.lock().unwrap().clone()
    }

    /// Id of the most recently accepted play
    pub fn last_play(&self) -> Option<PlayId> {
        self.plays.lock().unwrap().last().copied()
    }

    /// Completion event the node would send for the most recent play
    pub fn finished(&self) -> TrackEnd {
        TrackEnd::finished(self.last_play().expect("a track was played"))
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: BackendCall) -> encore_core::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(EncoreError::backend("node offline"));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl AudioBackend for FakeBackend {
    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    async fn play(&self, track: &Track, play: PlayId) -> encore_core::Result<()> {
        tokio::task::yield_now().await;
        self.record(BackendCall::Play(track.play_uri().to_string()))?;
        self.plays.lock().unwrap().push(play);
        self.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> encore_core::Result<()> {
        self.record(BackendCall::Stop)?;
        self.playing.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn pause(&self, paused: bool) -> encore_core::Result<()> {
        self.record(BackendCall::Pause(paused))
    }

    async fn set_volume(&self, percent: u16) -> encore_core::Result<()> {
        self.record(BackendCall::Volume(percent))
    }

    async fn disconnect(&self) -> encore_core::Result<()> {
        self.record(BackendCall::Disconnect)?;
        self.playing.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Search provider answering from a fixed title list, optionally held until released
#[derive(Default)]
pub struct GatedSearch {
    titles: HashMap<String, String>,
    gate: Option<Arc<Notify>>,
}

impl GatedSearch {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            titles: entries
                .iter()
                .map(|(query, title)| ((*query).to_string(), (*title).to_string()))
                .collect(),
            gate: None,
        }
    }

    /// Block every search until `gate` is notified
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl SearchProvider for GatedSearch {
    async fn search(&self, _source: SearchSource, query: &str) -> encore_core::Result<Vec<TrackInfo>> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(self
            .titles
            .get(query)
            .map(|title| vec![TrackInfo::new(title.clone(), "Artist", 200_000, title.clone())])
            .unwrap_or_default())
    }

    async fn is_available(&self) -> bool {
        true
    }
}

/// Track whose play handle equals `id`
pub fn track(id: &str) -> Track {
    Track::new(
        TrackInfo::new(format!("Track {}", id), "Test Artist", 180_000, id),
        RequesterId::new(1),
    )
}

/// Another copy of the song behind `id`, told apart only by its title
pub fn copy_of(id: &str, copy: usize) -> Track {
    Track::new(
        TrackInfo::new(format!("Track {} #{}", id, copy), "Test Artist", 180_000, id),
        RequesterId::new(1),
    )
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

pub fn uris(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(|t| t.play_uri().to_string()).collect()
}

pub fn titles(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(|t| t.title().to_string()).collect()
}

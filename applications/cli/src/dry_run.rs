/// Audio backend that only logs what it would do
use async_trait::async_trait;
use encore_core::{AudioBackend, CommunityId, PlayId, Track};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Stand-in player for running the playback core without a voice connection
#[derive(Debug)]
pub struct DryRunBackend {
    community: CommunityId,
    playing: AtomicBool,
}

impl DryRunBackend {
    pub fn new(community: CommunityId) -> Self {
        Self {
            community,
            playing: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl AudioBackend for DryRunBackend {
    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    async fn play(&self, track: &Track, play: PlayId) -> encore_core::Result<()> {
        info!(community = %self.community, title = %track.title(), play = %play, "[dry run] play");
        self.playing.store(true, Ordering::Release);
        Ok(())
    }

    async fn stop(&self) -> encore_core::Result<()> {
        info!(community = %self.community, "[dry run] stop");
        self.playing.store(false, Ordering::Release);
        Ok(())
    }

    async fn pause(&self, paused: bool) -> encore_core::Result<()> {
        info!(community = %self.community, paused, "[dry run] pause");
        Ok(())
    }

    async fn set_volume(&self, percent: u16) -> encore_core::Result<()> {
        info!(community = %self.community, percent, "[dry run] volume");
        Ok(())
    }

    async fn disconnect(&self) -> encore_core::Result<()> {
        info!(community = %self.community, "[dry run] disconnect");
        self.playing.store(false, Ordering::Release);
        Ok(())
    }
}

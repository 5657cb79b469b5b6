//! Lyrics for the current track

use crate::error::{PlaybackError, Result};
use crate::session::PlaybackSession;
use encore_core::{Lyrics, LyricsProvider};

/// Default cap on returned lyrics length, in characters
pub const DEFAULT_LYRICS_MAX_CHARS: usize = 4000;

/// Outcome of a lyrics lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LyricsLookup {
    /// Session is idle
    NothingPlaying,

    /// Provider has no lyrics for the current track
    NotFound,

    /// Lyrics, truncated to the requested length
    Found(Lyrics),
}

/// Look up lyrics for whatever `session` is playing
///
/// The session lock is only held long enough to copy the current track; the provider
/// call runs unlocked.
pub async fn lyrics_for_current(
    session: &PlaybackSession,
    provider: &dyn LyricsProvider,
    max_chars: usize,
) -> Result<LyricsLookup> {
    let Some(track) = session.current().await? else {
        return Ok(LyricsLookup::NothingPlaying);
    };

    let found = provider
        .search(track.title(), track.author())
        .await
        .map_err(PlaybackError::Provider)?;

    Ok(match found {
        Some(lyrics) => LyricsLookup::Found(truncate_lyrics(lyrics, max_chars)),
        None => LyricsLookup::NotFound,
    })
}

/// Cut lyrics text to at most `max_chars` characters
pub fn truncate_lyrics(lyrics: Lyrics, max_chars: usize) -> Lyrics {
    Lyrics {
        text: truncate_chars(&lyrics.text, max_chars),
        ..lyrics
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn truncated_lyrics_keep_title() {
        let lyrics = Lyrics {
            title: "Song".to_string(),
            text: "la la la".to_string(),
        };

        let cut = truncate_lyrics(lyrics, 5);

        assert_eq!(cut.title, "Song");
        assert_eq!(cut.text, "la la");
    }
}

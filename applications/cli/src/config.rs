/// CLI configuration
use crate::error::{CliError, Result};
use encore_playback::{SessionConfig, DEFAULT_LYRICS_MAX_CHARS, MAX_VOLUME, MIN_VOLUME};
use encore_providers::{LavalinkConfig, SpotifyConfig, DEFAULT_LYRICS_URL};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `ENCORE_LAVALINK__PASSWORD`
const ENV_PREFIX: &str = "ENCORE";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EncoreConfig {
    #[serde(default)]
    pub lavalink: LavalinkConfig,

    #[serde(default)]
    pub spotify: SpotifySettings,

    #[serde(default)]
    pub lyrics: LyricsSettings,

    #[serde(default)]
    pub playback: PlaybackSettings,
}

/// Spotify credentials; playlist links are not supported without them
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SpotifySettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LyricsSettings {
    #[serde(default = "default_lyrics_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_volume")]
    pub default_volume: u16,

    #[serde(default = "default_volume_step")]
    pub volume_step: u16,

    #[serde(default = "default_queue_page_size")]
    pub queue_page_size: usize,

    #[serde(default = "default_lyrics_max_chars")]
    pub lyrics_max_chars: usize,
}

impl EncoreConfig {
    /// Load configuration from `config.toml` (or `path`) and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    /// Load with an explicit environment map instead of the process environment
    pub fn load_from(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                // Load from config file if it exists
                let default_path = PathBuf::from("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (ENCORE_SECTION__KEY)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: EncoreConfig = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.lavalink.port == 0 {
            return Err(CliError::Config("Lavalink port must not be 0".to_string()));
        }

        if self.lavalink.password.is_empty() {
            return Err(CliError::Config(
                "Lavalink password is required (set ENCORE_LAVALINK__PASSWORD)".to_string(),
            ));
        }

        let volume = self.playback.default_volume;
        if !(MIN_VOLUME..=MAX_VOLUME).contains(&volume) {
            return Err(CliError::Config(format!(
                "default volume {} is outside {}..={}",
                volume, MIN_VOLUME, MAX_VOLUME
            )));
        }

        if self.playback.queue_page_size == 0 {
            return Err(CliError::Config(
                "queue page size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Spotify settings, if both credentials are present
    pub fn spotify_config(&self) -> Option<SpotifyConfig> {
        match (&self.spotify.client_id, &self.spotify.client_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Some(SpotifyConfig::new(id.clone(), secret.clone()))
            }
            _ => None,
        }
    }

    /// Settings applied to new playback sessions
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            default_volume: self.playback.default_volume,
            volume_step: self.playback.volume_step,
        }
    }
}

// Default values
impl Default for LyricsSettings {
    fn default() -> Self {
        Self {
            url: default_lyrics_url(),
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            default_volume: default_volume(),
            volume_step: default_volume_step(),
            queue_page_size: default_queue_page_size(),
            lyrics_max_chars: default_lyrics_max_chars(),
        }
    }
}

fn default_lyrics_url() -> String {
    DEFAULT_LYRICS_URL.to_string()
}

fn default_volume() -> u16 {
    100
}

fn default_volume_step() -> u16 {
    10
}

fn default_queue_page_size() -> usize {
    10
}

fn default_lyrics_max_chars() -> usize {
    DEFAULT_LYRICS_MAX_CHARS
}

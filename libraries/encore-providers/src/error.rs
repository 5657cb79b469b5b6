//! Error types for the HTTP providers.

use encore_core::EncoreError;
use thiserror::Error;

/// Errors that can occur when talking to Lavalink, Spotify or the lyrics service.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service returned an error response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Credentials were rejected or are missing
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid base URL in the configuration
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Lavalink could not load the requested identifier
    #[error("Track loading failed: {0}")]
    LoadFailed(String),
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

impl From<url::ParseError> for ProviderError {
    fn from(e: url::ParseError) -> Self {
        ProviderError::InvalidUrl(e.to_string())
    }
}

impl From<ProviderError> for EncoreError {
    fn from(e: ProviderError) -> Self {
        match &e {
            ProviderError::Request(inner) if inner.is_connect() || inner.is_timeout() => {
                EncoreError::network(e.to_string())
            }
            ProviderError::InvalidUrl(_) => EncoreError::invalid_input(e.to_string()),
            _ => EncoreError::provider(e.to_string()),
        }
    }
}

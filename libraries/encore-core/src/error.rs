/// Core error types for Encore
use thiserror::Error;

/// Result type alias using `EncoreError`
pub type Result<T> = std::result::Result<T, EncoreError>;

/// Error reported by an external collaborator (audio backend or provider)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncoreError {
    /// Audio backend refused or failed a control call
    #[error("Audio backend error: {0}")]
    Backend(String),

    /// Search, playlist or lyrics provider failed
    #[error("Provider error: {0}")]
    Provider(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl EncoreError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
}

/// Core error types for Padboard
use thiserror::Error;

/// Result type alias using `BoardError`
pub type Result<T> = std::result::Result<T, BoardError>;

/// Core error type for Padboard
#[derive(Error, Debug)]
pub enum BoardError {
    /// Asset loading errors (missing or unreadable bundled sound)
    #[error("Asset error: {0}")]
    Asset(String),

    /// Audio decoding/playback errors
    #[error("Audio error: {0}")]
    Audio(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl BoardError {
    /// Create an asset error
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Create an audio error
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

//! Error types for soundboard playback

use padboard_core::{BoardError, PadId};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// A pad was referenced that was never registered
    #[error("Unknown pad: {0}")]
    UnknownKey(PadId),

    /// An uploaded file exceeds the configured size limit
    #[error("File too large: {size} bytes (limit {limit})")]
    FileTooLarge {
        /// Declared size of the upload
        size: u64,
        /// Configured maximum
        limit: u64,
    },

    /// An uploaded file's MIME type is not accepted as audio
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The platform refused to start audio (autoplay policy)
    #[error("Playback blocked by autoplay policy")]
    PlaybackBlocked,

    /// Resource bytes could not be decoded
    #[error("Decode failure: {0}")]
    DecodeFailure(String),

    /// Every playback strategy was exhausted
    #[error("Sound did not start, tap again to retry")]
    PlaybackFailed,

    /// Asset loading error from the core layer
    #[error("Asset error: {0}")]
    Asset(#[from] BoardError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

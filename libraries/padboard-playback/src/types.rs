//! Core types for soundboard playback

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Which strategy actually produced sound for a play request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackTier {
    /// Voice started from a cached decoded clip
    DecodedClip,

    /// Element-based media playback
    Media,

    /// Element-based media playback, retried after an unlock
    MediaRetry,
}

/// Outcome of a play request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Playback started through the given tier
    Started(PlaybackTier),

    /// A newer play or stop request arrived while this one was in flight;
    /// its result was discarded and nothing was started
    Superseded,
}

/// A user-supplied sound file submitted for a pad
#[derive(Debug, Clone)]
pub struct SoundUpload {
    /// Raw file bytes
    pub bytes: Arc<Vec<u8>>,

    /// Declared size in bytes (browsers report this without reading the file)
    pub size_bytes: u64,

    /// Declared MIME type
    pub mime: String,
}

impl SoundUpload {
    /// Create an upload, deriving the declared size from the bytes
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        let size_bytes = bytes.len() as u64;
        Self {
            bytes: Arc::new(bytes),
            size_bytes,
            mime: mime.into(),
        }
    }

    /// Create an upload with an explicitly declared size
    ///
    /// Hosts that know the file size before reading it (the browser `File`
    /// API does) can validate against the declared size.
    pub fn with_declared_size(bytes: Vec<u8>, size_bytes: u64, mime: impl Into<String>) -> Self {
        Self {
            bytes: Arc::new(bytes),
            size_bytes,
            mime: mime.into(),
        }
    }
}

/// Configuration for the soundboard core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Delay before the unlock-and-retry tier's second media attempt
    /// (default: 100ms)
    pub retry_delay_ms: u64,

    /// Maximum accepted upload size in bytes (default: 10 MiB)
    pub max_upload_bytes: u64,

    /// Non-`audio/*` MIME types accepted as audio-only containers
    /// (default: `video/mp4`)
    pub extra_containers: Vec<String>,
}

impl BoardConfig {
    /// The retry delay as a `Duration`
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            retry_delay_ms: 100,
            max_upload_bytes: 10 * 1024 * 1024,
            extra_containers: vec!["video/mp4".to_string()],
        }
    }
}

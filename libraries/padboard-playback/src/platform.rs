//! Platform-agnostic audio backend traits
//!
//! Abstracts the host's audio stack (a Web-Audio-style output context plus
//! media-element playback) so the engine and unlock gate can be exercised
//! without a browser or a sound card.

use crate::error::Result;
use async_trait::async_trait;
use padboard_core::{PcmClip, SoundLocator};

/// State of the platform's audio output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputState {
    /// The output will not produce sound until resumed from a user gesture
    Suspended,

    /// The output is allowed to produce sound
    Running,
}

/// Platform audio backend
///
/// Implementors bridge to whatever the host actually plays sound with. The
/// engine uses it for all three playback tiers; the unlock gate uses it to
/// resume a suspended output.
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Query whether the output is currently allowed to produce sound
    fn output_state(&self) -> OutputState;

    /// Ask the platform to resume a suspended output
    ///
    /// Only meaningful when called from a user gesture; the platform may
    /// refuse otherwise.
    ///
    /// # Errors
    /// Returns [`crate::PlaybackError::PlaybackBlocked`] when the platform
    /// refuses, or another error when no output exists at all
    async fn resume_output(&self) -> Result<()>;

    /// Decode raw file bytes into a PCM clip
    ///
    /// # Errors
    /// Returns [`crate::PlaybackError::DecodeFailure`] if the bytes are not
    /// decodable audio
    async fn decode(&self, bytes: &[u8]) -> Result<PcmClip>;

    /// Start a voice from a decoded clip
    ///
    /// Synchronous and lowest-latency; only valid once the output is
    /// unlocked.
    ///
    /// # Errors
    /// Returns an error if the voice cannot be created
    fn start_clip(&self, clip: &PcmClip) -> Result<Box<dyn PlaybackHandle>>;

    /// Start element-based playback for a locator, from position zero
    ///
    /// Asynchronous; may reject under the platform's autoplay policy or on
    /// decode/network errors.
    ///
    /// # Errors
    /// Returns [`crate::PlaybackError::PlaybackBlocked`] on policy refusal,
    /// or a decode/asset error
    async fn start_media(&self, locator: &SoundLocator) -> Result<Box<dyn PlaybackHandle>>;

    /// Play a short confirmation cue after a successful unlock
    ///
    /// Default is a no-op; hosts that want the audible confirmation override
    /// it.
    fn play_unlock_cue(&self) {}
}

/// Opaque handle to whichever playback primitive is producing sound
pub trait PlaybackHandle: Send {
    /// Stop playback immediately
    ///
    /// Must be safe to call more than once.
    fn stop(&mut self);

    /// Whether the sound reached its natural end
    fn is_finished(&self) -> bool;
}

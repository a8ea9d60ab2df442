//! Playback Events
//!
//! Event-based communication for UI synchronization. Events are emitted at
//! key points:
//! - Playback started (drives the key-flash animation)
//! - Playback stopped / finished naturally
//! - Terminal playback failure (drives the "tap again" toast)
//! - Audio unlocked, pad sound replaced/restored

use crate::types::PlaybackTier;
use padboard_core::{PadId, ResourceId};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Events emitted by the soundboard core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PadEvent {
    /// A sound started playing
    PlaybackStarted {
        /// The pad being played
        key: PadId,
        /// Which strategy produced the sound
        tier: PlaybackTier,
    },

    /// All playback was stopped explicitly
    PlaybackStopped,

    /// The current sound reached its natural end
    PlaybackFinished {
        /// The pad whose sound finished
        key: PadId,
    },

    /// A play request failed terminally
    PlaybackFailed {
        /// The pad that failed to play
        key: PadId,
        /// User-facing reason
        reason: String,
    },

    /// The platform's audio output was unlocked
    AudioUnlocked,

    /// A pad's sound was replaced with a user upload
    SoundReplaced {
        /// The pad that was edited
        key: PadId,
        /// Id of the accepted replacement
        resource: ResourceId,
    },

    /// A pad's sound was restored to its bundled default
    SoundRestored {
        /// The pad that was restored
        key: PadId,
    },
}

/// Sink for feedback events consumed by the UI layer
///
/// The core only emits; how events reach the UI (event bus, channel, direct
/// callback) is the host's choice.
pub trait FeedbackSink: Send + Sync {
    /// Deliver one event
    fn notify(&self, event: PadEvent);
}

/// Buffering sink for poll-and-drain hosts
///
/// Accumulates events until the UI's periodic tick drains them, the same way
/// a polling event-emission loop consumes pending playback events.
#[derive(Debug, Default)]
pub struct BufferedFeedback {
    pending: Mutex<Vec<PadEvent>>,
}

impl BufferedFeedback {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all pending events, oldest first
    pub fn drain(&self) -> Vec<PadEvent> {
        std::mem::take(&mut *self.pending.lock().unwrap())
    }

    /// Check whether any events are pending
    pub fn is_empty(&self) -> bool {
        self.pending.lock().unwrap().is_empty()
    }
}

impl FeedbackSink for BufferedFeedback {
    fn notify(&self, event: PadEvent) {
        self.pending.lock().unwrap().push(event);
    }
}

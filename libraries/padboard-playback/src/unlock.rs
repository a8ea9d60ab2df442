//! Audio unlock gate
//!
//! Browsers refuse to start audio output until a user gesture has occurred.
//! The gate centralizes the "try on every gesture until it works" policy into
//! a single state machine so the playback engine never duplicates it.

use crate::error::PlaybackError;
use crate::events::{FeedbackSink, PadEvent};
use crate::platform::{AudioBackend, OutputState};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Process-wide unlock state
///
/// `Unlocked` is permanent for the session; a failed attempt falls back to
/// `Locked` and stays eligible for retry on the next gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnlockState {
    /// Audio output requires a user gesture before it can play
    Locked,

    /// A resume request is in flight
    Unlocking,

    /// Audio output is allowed to play
    Unlocked,
}

/// Result of one unlock attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockResult {
    /// The output is (now) allowed to play
    Unlocked,

    /// The platform refused; retry on the next gesture
    StillLocked,

    /// The backend failed outright (for example, no audio output exists)
    Error,
}

/// Gate over the platform's gesture-gated audio output
pub struct AudioUnlockGate {
    backend: Arc<dyn AudioBackend>,
    feedback: Arc<dyn FeedbackSink>,
    state: Mutex<UnlockState>,
}

impl AudioUnlockGate {
    /// Create a gate in the `Locked` state
    pub fn new(backend: Arc<dyn AudioBackend>, feedback: Arc<dyn FeedbackSink>) -> Self {
        Self {
            backend,
            feedback,
            state: Mutex::new(UnlockState::Locked),
        }
    }

    /// Whether the output is unlocked
    pub fn is_unlocked(&self) -> bool {
        *self.state.lock().unwrap() == UnlockState::Unlocked
    }

    /// Current unlock state
    pub fn state(&self) -> UnlockState {
        *self.state.lock().unwrap()
    }

    /// Attempt to unlock the audio output
    ///
    /// Call from a user gesture (pointer-down, click, key-down). Idempotent:
    /// once unlocked, returns `Unlocked` without touching the backend again.
    /// A gesture arriving while another attempt is in flight returns
    /// `StillLocked` rather than issuing a duplicate resume.
    pub async fn attempt_unlock(&self) -> UnlockResult {
        {
            let mut state = self.state.lock().unwrap();
            match *state {
                UnlockState::Unlocked => return UnlockResult::Unlocked,
                UnlockState::Unlocking => return UnlockResult::StillLocked,
                UnlockState::Locked => *state = UnlockState::Unlocking,
            }
        }

        // An output that is already running needs no resume call; this is the
        // startup case where the platform never suspended it.
        if self.backend.output_state() == OutputState::Running {
            self.mark_unlocked();
            return UnlockResult::Unlocked;
        }

        match self.backend.resume_output().await {
            Ok(()) => {
                self.mark_unlocked();
                self.backend.play_unlock_cue();
                UnlockResult::Unlocked
            }
            Err(PlaybackError::PlaybackBlocked) => {
                debug!("audio resume refused, staying locked for next gesture");
                *self.state.lock().unwrap() = UnlockState::Locked;
                UnlockResult::StillLocked
            }
            Err(err) => {
                warn!(error = %err, "audio resume failed");
                *self.state.lock().unwrap() = UnlockState::Locked;
                UnlockResult::Error
            }
        }
    }

    fn mark_unlocked(&self) {
        *self.state.lock().unwrap() = UnlockState::Unlocked;
        self.feedback.notify(PadEvent::AudioUnlocked);
    }
}

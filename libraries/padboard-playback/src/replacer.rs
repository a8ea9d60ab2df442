//! Resource replacer - user sound uploads
//!
//! Validates a user-provided audio file and hands it to the registry.
//! Validation failures mutate nothing; an accepted upload swaps the pad's
//! resource and invalidates any cached decoded clip.

use crate::engine::PlaybackEngine;
use crate::error::{PlaybackError, Result};
use crate::events::{FeedbackSink, PadEvent};
use crate::registry::SoundRegistry;
use crate::types::{BoardConfig, PlayOutcome, SoundUpload};
use padboard_core::{PadId, ResourceId, SoundLocator};
use std::sync::{Arc, Mutex};

/// Accepts user-supplied sound files for pads
pub struct ResourceReplacer {
    registry: Arc<Mutex<SoundRegistry>>,
    feedback: Arc<dyn FeedbackSink>,
    config: BoardConfig,
}

impl ResourceReplacer {
    /// Create a replacer over the shared registry
    pub fn new(
        registry: Arc<Mutex<SoundRegistry>>,
        feedback: Arc<dyn FeedbackSink>,
        config: BoardConfig,
    ) -> Self {
        Self {
            registry,
            feedback,
            config,
        }
    }

    /// Validate an upload and swap it in as the pad's sound
    ///
    /// Fails with [`PlaybackError::FileTooLarge`] past the configured size
    /// limit, [`PlaybackError::UnsupportedFormat`] for MIME types that are
    /// neither `audio/*` nor an accepted container, and
    /// [`PlaybackError::UnknownKey`] for unregistered pads. Returns the
    /// generated id of the accepted resource; the host persists it as the
    /// pad's override reference.
    pub fn submit(&self, key: &PadId, upload: SoundUpload) -> Result<ResourceId> {
        if upload.size_bytes > self.config.max_upload_bytes {
            return Err(PlaybackError::FileTooLarge {
                size: upload.size_bytes,
                limit: self.config.max_upload_bytes,
            });
        }
        if !self.accepts_mime(&upload.mime) {
            return Err(PlaybackError::UnsupportedFormat(upload.mime));
        }

        let id = ResourceId::generate();
        let locator = SoundLocator::Memory {
            id: id.clone(),
            bytes: upload.bytes,
            mime: upload.mime,
        };
        self.registry.lock().unwrap().replace(key, locator)?;
        self.feedback.notify(PadEvent::SoundReplaced {
            key: key.clone(),
            resource: id.clone(),
        });
        Ok(id)
    }

    /// Revert a pad to its bundled default sound
    pub fn restore(&self, key: &PadId) -> Result<()> {
        self.registry.lock().unwrap().restore_default(key)?;
        self.feedback
            .notify(PadEvent::SoundRestored { key: key.clone() });
        Ok(())
    }

    /// Preview a pad's current sound
    ///
    /// Convenience for the edit dialog's "test sound" button right after a
    /// submit; just forwards to the engine.
    pub async fn test_play(&self, key: &PadId, engine: &PlaybackEngine) -> Result<PlayOutcome> {
        engine.play(key).await
    }

    fn accepts_mime(&self, mime: &str) -> bool {
        mime.starts_with("audio/") || self.config.extra_containers.iter().any(|c| c == mime)
    }
}

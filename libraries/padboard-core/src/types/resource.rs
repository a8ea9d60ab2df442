/// Sound resource types
use crate::types::{PcmClip, ResourceId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a pad's sound came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// The bundled asset shipped with the board
    Default,

    /// A user-supplied replacement
    UserReplaced,
}

/// Byte source for a pad's audio
#[derive(Debug, Clone)]
pub enum SoundLocator {
    /// Bundled asset, resolved to bytes by the injected loader
    Bundled {
        /// Asset path relative to the sound bundle root
        path: PathBuf,
    },

    /// In-memory blob from a user upload
    Memory {
        /// Generated id of the replacement resource
        id: ResourceId,
        /// Raw file bytes
        bytes: Arc<Vec<u8>>,
        /// Declared MIME type of the upload
        mime: String,
    },
}

impl SoundLocator {
    /// Create a bundled-asset locator
    pub fn bundled(path: impl Into<PathBuf>) -> Self {
        Self::Bundled { path: path.into() }
    }

    /// Create an in-memory locator from uploaded bytes
    pub fn memory(id: ResourceId, bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self::Memory {
            id,
            bytes: Arc::new(bytes),
            mime: mime.into(),
        }
    }
}

impl fmt::Display for SoundLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled { path } => write!(f, "asset:{}", path.display()),
            Self::Memory { id, .. } => write!(f, "memory:{}", id),
        }
    }
}

/// The audio to play for one pad
///
/// Exactly one `SoundResource` exists per pad at any time. Replacing the
/// locator always drops the decoded cache and bumps `revision`, so a decode
/// that was in flight against the old bytes can never re-attach.
#[derive(Debug, Clone)]
pub struct SoundResource {
    /// Origin of the current locator
    pub source: SourceKind,

    /// Byte source for playback
    pub locator: SoundLocator,

    /// Cached decoded PCM, present only when eagerly decoded
    pub decoded: Option<Arc<PcmClip>>,

    /// Bumped on every locator change; guards stale cache attachments
    pub revision: u64,
}

impl SoundResource {
    /// Create the initial resource for a pad from its bundled asset
    pub fn bundled_default(locator: SoundLocator) -> Self {
        Self {
            source: SourceKind::Default,
            locator,
            decoded: None,
            revision: 0,
        }
    }

    /// Whether the pad currently plays a user-supplied sound
    pub fn is_replaced(&self) -> bool {
        self.source == SourceKind::UserReplaced
    }
}

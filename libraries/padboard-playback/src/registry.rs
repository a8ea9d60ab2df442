//! Sound registry - pad to resource mapping
//!
//! Owns the `PadId -> SoundResource` map and the canonical bundled default
//! per pad. No side effects beyond the map itself; loading bytes and decoding
//! are the engine's job.

use crate::error::{PlaybackError, Result};
use padboard_core::{PadId, PcmClip, SoundLocator, SoundResource, SourceKind};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of every pad's current sound
#[derive(Debug, Default)]
pub struct SoundRegistry {
    pads: HashMap<PadId, PadSlot>,
}

#[derive(Debug)]
struct PadSlot {
    /// The bundled asset this pad reverts to
    default: SoundLocator,
    resource: SoundResource,
}

impl SoundRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pad with its bundled default sound
    ///
    /// Called once per pad at startup from the static key layout.
    /// Re-registering a pad resets it to the new default and invalidates any
    /// cached clip.
    pub fn register(&mut self, key: PadId, default: SoundLocator) {
        let revision = self
            .pads
            .get(&key)
            .map_or(0, |slot| slot.resource.revision + 1);
        let mut resource = SoundResource::bundled_default(default.clone());
        resource.revision = revision;
        self.pads.insert(key, PadSlot { default, resource });
    }

    /// Resolve a pad to its current resource
    pub fn resolve(&self, key: &PadId) -> Result<SoundResource> {
        self.pads
            .get(key)
            .map(|slot| slot.resource.clone())
            .ok_or_else(|| PlaybackError::UnknownKey(key.clone()))
    }

    /// Swap a pad's resource for a user-supplied locator
    ///
    /// Always invalidates the decoded cache. Also the rehydration entry point:
    /// at startup the host replays persisted overrides through this call.
    pub fn replace(&mut self, key: &PadId, locator: SoundLocator) -> Result<()> {
        let slot = self.slot_mut(key)?;
        slot.resource = SoundResource {
            source: SourceKind::UserReplaced,
            locator,
            decoded: None,
            revision: slot.resource.revision + 1,
        };
        Ok(())
    }

    /// Revert a pad to its bundled asset, invalidating any cached clip
    pub fn restore_default(&mut self, key: &PadId) -> Result<()> {
        let slot = self.slot_mut(key)?;
        slot.resource = SoundResource {
            source: SourceKind::Default,
            locator: slot.default.clone(),
            decoded: None,
            revision: slot.resource.revision + 1,
        };
        Ok(())
    }

    /// Attach a decoded clip to a pad's resource
    ///
    /// `revision` must be the revision observed when the decode started.
    /// Returns `false` (caching nothing) when the resource changed in the
    /// meantime - a stale decode can never resurrect replaced audio.
    pub fn cache_decoded(
        &mut self,
        key: &PadId,
        revision: u64,
        clip: Arc<PcmClip>,
    ) -> Result<bool> {
        let slot = self.slot_mut(key)?;
        if slot.resource.revision != revision {
            return Ok(false);
        }
        slot.resource.decoded = Some(clip);
        Ok(true)
    }

    /// All registered pads
    pub fn keys(&self) -> Vec<PadId> {
        self.pads.keys().cloned().collect()
    }

    /// Number of registered pads
    pub fn len(&self) -> usize {
        self.pads.len()
    }

    /// Check if no pads are registered
    pub fn is_empty(&self) -> bool {
        self.pads.is_empty()
    }

    fn slot_mut(&mut self, key: &PadId) -> Result<&mut PadSlot> {
        self.pads
            .get_mut(key)
            .ok_or_else(|| PlaybackError::UnknownKey(key.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padboard_core::{ClipFormat, ResourceId};

    fn pad(id: &str) -> PadId {
        PadId::new(id)
    }

    fn clip() -> Arc<PcmClip> {
        Arc::new(PcmClip::new(vec![0.0; 64], ClipFormat::stereo(44_100)))
    }

    #[test]
    fn resolve_unknown_pad_fails() {
        let registry = SoundRegistry::new();
        let err = registry.resolve(&pad("nope")).unwrap_err();
        assert!(matches!(err, PlaybackError::UnknownKey(_)));
    }

    #[test]
    fn register_and_resolve() {
        let mut registry = SoundRegistry::new();
        registry.register(pad("a"), SoundLocator::bundled("sounds/a.mp3"));

        let resource = registry.resolve(&pad("a")).unwrap();
        assert_eq!(resource.source, SourceKind::Default);
        assert!(resource.decoded.is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn replace_invalidates_cache_and_bumps_revision() {
        let mut registry = SoundRegistry::new();
        registry.register(pad("a"), SoundLocator::bundled("sounds/a.mp3"));
        assert!(registry.cache_decoded(&pad("a"), 0, clip()).unwrap());
        assert!(registry.resolve(&pad("a")).unwrap().decoded.is_some());

        let locator = SoundLocator::memory(ResourceId::generate(), vec![1, 2, 3], "audio/mpeg");
        registry.replace(&pad("a"), locator).unwrap();

        let resource = registry.resolve(&pad("a")).unwrap();
        assert!(resource.is_replaced());
        assert!(resource.decoded.is_none());
        assert_eq!(resource.revision, 1);
    }

    #[test]
    fn stale_decode_is_discarded() {
        let mut registry = SoundRegistry::new();
        registry.register(pad("a"), SoundLocator::bundled("sounds/a.mp3"));
        let before = registry.resolve(&pad("a")).unwrap().revision;

        let locator = SoundLocator::memory(ResourceId::generate(), vec![1], "audio/wav");
        registry.replace(&pad("a"), locator).unwrap();

        // Decode that raced with the replace must not attach
        assert!(!registry.cache_decoded(&pad("a"), before, clip()).unwrap());
        assert!(registry.resolve(&pad("a")).unwrap().decoded.is_none());
    }

    #[test]
    fn restore_default_reverts_locator() {
        let mut registry = SoundRegistry::new();
        registry.register(pad("a"), SoundLocator::bundled("sounds/a.mp3"));
        let locator = SoundLocator::memory(ResourceId::generate(), vec![1], "audio/wav");
        registry.replace(&pad("a"), locator).unwrap();

        registry.restore_default(&pad("a")).unwrap();
        let resource = registry.resolve(&pad("a")).unwrap();
        assert_eq!(resource.source, SourceKind::Default);
        assert!(matches!(resource.locator, SoundLocator::Bundled { .. }));
        assert!(resource.decoded.is_none());
        assert_eq!(resource.revision, 2);
    }

    #[test]
    fn reregister_resets_to_new_default() {
        let mut registry = SoundRegistry::new();
        registry.register(pad("a"), SoundLocator::bundled("sounds/a.mp3"));
        assert!(registry.cache_decoded(&pad("a"), 0, clip()).unwrap());

        registry.register(pad("a"), SoundLocator::bundled("sounds/b.mp3"));
        let resource = registry.resolve(&pad("a")).unwrap();
        assert!(resource.decoded.is_none());
        assert_eq!(resource.source, SourceKind::Default);
        // Revision moved forward so older cache attempts stay stale
        assert_eq!(resource.revision, 1);
    }
}

//! Playback engine - core orchestration
//!
//! The state machine behind every key press: resolve the pad's sound, stop
//! whatever is playing, and start the new sound through a tiered strategy
//! (decoded clip, then media element, then unlock-and-retry). At most one
//! sound is ever audible; a newer request always wins over one still in
//! flight.

use crate::error::{PlaybackError, Result};
use crate::events::{FeedbackSink, PadEvent};
use crate::platform::{AudioBackend, PlaybackHandle};
use crate::registry::SoundRegistry;
use crate::types::{BoardConfig, PlayOutcome, PlaybackTier};
use crate::unlock::{AudioUnlockGate, UnlockResult};
use padboard_core::{PadId, SoundLoader, SoundLocator, SoundResource};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::sleep;
use tracing::{debug, warn};

/// The currently playing sound - at most one alive at a time
struct PlaybackSession {
    key: PadId,
    tier: PlaybackTier,
    handle: Box<dyn PlaybackHandle>,
}

/// Engine state guarded by one lock, never held across an await
struct EngineInner {
    session: Option<PlaybackSession>,

    /// Generation counter: each play or stop bumps it, so an older request
    /// still awaiting a platform result can detect that it was superseded
    attempt: u64,
}

/// Central playback state machine
///
/// All collaborators are constructor-injected, so the engine can be exercised
/// in isolation with mock backends:
/// - [`AudioBackend`] - the platform's audio stack
/// - [`SoundLoader`] - bundled-asset bytes
/// - [`SoundRegistry`] - pad-to-resource mapping (shared with the replacer)
/// - [`AudioUnlockGate`] - gesture-gated output state (shared with the UI)
/// - [`FeedbackSink`] - key-flash / toast notifications
pub struct PlaybackEngine {
    backend: Arc<dyn AudioBackend>,
    loader: Arc<dyn SoundLoader>,
    registry: Arc<Mutex<SoundRegistry>>,
    gate: Arc<AudioUnlockGate>,
    feedback: Arc<dyn FeedbackSink>,
    config: BoardConfig,
    inner: Mutex<EngineInner>,
    sounds_played: AtomicU64,
}

impl PlaybackEngine {
    /// Create a new engine in the idle state
    pub fn new(
        backend: Arc<dyn AudioBackend>,
        loader: Arc<dyn SoundLoader>,
        registry: Arc<Mutex<SoundRegistry>>,
        gate: Arc<AudioUnlockGate>,
        feedback: Arc<dyn FeedbackSink>,
        config: BoardConfig,
    ) -> Self {
        Self {
            backend,
            loader,
            registry,
            gate,
            feedback,
            config,
            inner: Mutex::new(EngineInner {
                session: None,
                attempt: 0,
            }),
            sounds_played: AtomicU64::new(0),
        }
    }

    // ===== Playback Control =====

    /// Play the sound bound to a pad
    ///
    /// Stops any currently playing sound first, then tries each tier in
    /// order:
    /// 1. A cached decoded clip (only once the output is unlocked)
    /// 2. Element-based media playback
    /// 3. One media retry after a successful unlock attempt
    ///
    /// Every tier failure falls through to the next; when all are exhausted
    /// the terminal failure is reported to the feedback sink exactly once and
    /// returned as [`PlaybackError::PlaybackFailed`]. The engine stays fully
    /// usable afterwards.
    ///
    /// A request superseded mid-flight by a newer `play` or `stop_all`
    /// returns [`PlayOutcome::Superseded`] and emits nothing - its result is
    /// discarded so it can never create a second concurrent session.
    pub async fn play(&self, key: &PadId) -> Result<PlayOutcome> {
        let resolved = self.registry.lock().unwrap().resolve(key);
        let resource = match resolved {
            Ok(resource) => resource,
            Err(err) => {
                self.feedback.notify(PadEvent::PlaybackFailed {
                    key: key.clone(),
                    reason: err.to_string(),
                });
                return Err(err);
            }
        };

        let attempt = self.begin_attempt();

        // Decoded-clip tier: instant start, no gesture-timing issues once
        // the output is unlocked.
        if self.gate.is_unlocked() {
            if let Some(clip) = resource.decoded.as_deref() {
                match self.backend.start_clip(clip) {
                    Ok(handle) => {
                        return Ok(self.install(attempt, key, PlaybackTier::DecodedClip, handle))
                    }
                    Err(err) => {
                        debug!(key = %key, error = %err, "decoded-clip start failed, falling back");
                    }
                }
            }
        }

        // Media tier.
        let media_err = match self.backend.start_media(&resource.locator).await {
            Ok(handle) => return Ok(self.install(attempt, key, PlaybackTier::Media, handle)),
            Err(err) => err,
        };
        if self.superseded(attempt) {
            return Ok(PlayOutcome::Superseded);
        }

        // Unlock-and-retry tier: the rejection is usually the autoplay
        // policy, so unlock on this gesture and give the element one more
        // chance after a short delay.
        debug!(key = %key, error = %media_err, "media start rejected, attempting unlock");
        if self.gate.attempt_unlock().await == UnlockResult::Unlocked {
            sleep(self.config.retry_delay()).await;
            if self.superseded(attempt) {
                return Ok(PlayOutcome::Superseded);
            }
            match self.backend.start_media(&resource.locator).await {
                Ok(handle) => {
                    return Ok(self.install(attempt, key, PlaybackTier::MediaRetry, handle))
                }
                Err(err) => warn!(key = %key, error = %err, "media retry after unlock failed"),
            }
        }

        if self.superseded(attempt) {
            return Ok(PlayOutcome::Superseded);
        }
        self.feedback.notify(PadEvent::PlaybackFailed {
            key: key.clone(),
            reason: PlaybackError::PlaybackFailed.to_string(),
        });
        Err(PlaybackError::PlaybackFailed)
    }

    /// Stop any active playback
    ///
    /// Also supersedes play requests still in flight, so a stale platform
    /// result arriving later cannot restart sound.
    pub fn stop_all(&self) {
        let stopped = {
            let mut inner = self.inner.lock().unwrap();
            inner.attempt += 1;
            inner.session.take()
        };
        if let Some(mut session) = stopped {
            session.handle.stop();
        }
        self.feedback.notify(PadEvent::PlaybackStopped);
    }

    /// Reap a naturally finished sound
    ///
    /// The host's periodic tick calls this; when the current handle reports
    /// end-of-media the session is cleared and `PlaybackFinished` is emitted.
    /// Returns the pad whose sound finished, if any.
    pub fn reap_finished(&self) -> Option<PadId> {
        let finished = {
            let mut inner = self.inner.lock().unwrap();
            match inner.session.as_ref() {
                Some(session) if session.handle.is_finished() => inner.session.take(),
                _ => None,
            }
        };
        let session = finished?;
        self.feedback.notify(PadEvent::PlaybackFinished {
            key: session.key.clone(),
        });
        Some(session.key)
    }

    // ===== Preloading =====

    /// Eagerly decode one pad's sound into the registry cache
    ///
    /// No-op if a clip is already cached. A replace racing with the decode
    /// wins: the stale clip is discarded by the registry's revision guard.
    pub async fn preload(&self, key: &PadId) -> Result<()> {
        let resource = self.registry.lock().unwrap().resolve(key)?;
        if resource.decoded.is_some() {
            return Ok(());
        }

        let bytes = self.resource_bytes(&resource).await?;
        let clip = self.backend.decode(&bytes).await?;
        let cached =
            self.registry
                .lock()
                .unwrap()
                .cache_decoded(key, resource.revision, Arc::new(clip))?;
        if !cached {
            debug!(key = %key, "sound replaced during decode, cache discarded");
        }
        Ok(())
    }

    /// Eagerly decode every registered pad
    ///
    /// Individual failures are logged and skipped - a pad whose decode fails
    /// simply keeps using media playback.
    pub async fn preload_all(&self) {
        let keys = self.registry.lock().unwrap().keys();
        for key in keys {
            if let Err(err) = self.preload(&key).await {
                warn!(key = %key, error = %err, "preload failed, pad will use media playback");
            }
        }
    }

    // ===== State Queries =====

    /// The pad currently playing, if any
    pub fn current(&self) -> Option<PadId> {
        self.inner
            .lock()
            .unwrap()
            .session
            .as_ref()
            .map(|s| s.key.clone())
    }

    /// The tier that produced the current sound, if any
    pub fn current_tier(&self) -> Option<PlaybackTier> {
        self.inner.lock().unwrap().session.as_ref().map(|s| s.tier)
    }

    /// Whether no sound is playing
    pub fn is_idle(&self) -> bool {
        self.inner.lock().unwrap().session.is_none()
    }

    /// Number of sounds successfully started this session
    pub fn sounds_played(&self) -> u64 {
        self.sounds_played.load(Ordering::Relaxed)
    }

    /// Rehydrate the sounds-played counter from the host's persisted value
    pub fn set_sounds_played(&self, count: u64) {
        self.sounds_played.store(count, Ordering::Relaxed);
    }

    // ===== Internals =====

    /// Start a new attempt: supersede older ones and stop the active session
    fn begin_attempt(&self) -> u64 {
        let mut inner = self.inner.lock().unwrap();
        inner.attempt += 1;
        if let Some(mut session) = inner.session.take() {
            session.handle.stop();
        }
        inner.attempt
    }

    fn superseded(&self, attempt: u64) -> bool {
        self.inner.lock().unwrap().attempt != attempt
    }

    /// Install a started handle as the current session - unless a newer
    /// request won the race, in which case the handle is stopped and the
    /// outcome discarded
    fn install(
        &self,
        attempt: u64,
        key: &PadId,
        tier: PlaybackTier,
        mut handle: Box<dyn PlaybackHandle>,
    ) -> PlayOutcome {
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.attempt != attempt {
                handle.stop();
                return PlayOutcome::Superseded;
            }
            if let Some(mut stale) = inner.session.take() {
                stale.handle.stop();
            }
            inner.session = Some(PlaybackSession {
                key: key.clone(),
                tier,
                handle,
            });
        }
        self.sounds_played.fetch_add(1, Ordering::Relaxed);
        self.feedback.notify(PadEvent::PlaybackStarted {
            key: key.clone(),
            tier,
        });
        PlayOutcome::Started(tier)
    }

    async fn resource_bytes(&self, resource: &SoundResource) -> Result<Arc<Vec<u8>>> {
        match &resource.locator {
            SoundLocator::Memory { bytes, .. } => Ok(Arc::clone(bytes)),
            SoundLocator::Bundled { path } => Ok(Arc::new(self.loader.load(path).await?)),
        }
    }
}

//! Shared test fixtures for playback integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use padboard_core::{ClipFormat, PadId, PcmClip, Result as CoreResult, SoundLoader, SoundLocator};
use padboard_playback::{
    AudioBackend, AudioUnlockGate, BoardConfig, BufferedFeedback, OutputState, PlaybackEngine,
    PlaybackError, PlaybackHandle, ResourceReplacer, Result, SoundRegistry,
};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ===== Mock Backend =====

/// What kind of start produced a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartKind {
    Clip,
    Media,
}

/// Record of one started handle, with flags shared with the live handle
pub struct StartRecord {
    pub kind: StartKind,
    pub label: String,
    pub stopped: Arc<AtomicBool>,
    pub finished: Arc<AtomicBool>,
}

struct MockHandle {
    stopped: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
}

impl PlaybackHandle for MockHandle {
    fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

/// Scriptable audio backend
///
/// Counters control upcoming behavior: `media_rejections` rejects that many
/// `start_media` calls with `PlaybackBlocked`; `hold_media` parks that many
/// calls until `media_release` is notified (for preemption tests).
pub struct MockBackend {
    pub output: Mutex<OutputState>,
    pub allow_resume: AtomicBool,
    pub resume_calls: AtomicUsize,
    pub cue_calls: AtomicUsize,
    pub media_rejections: AtomicUsize,
    pub hold_media: AtomicUsize,
    pub media_release: Notify,
    pub decode_fail: AtomicBool,
    pub started: Mutex<Vec<StartRecord>>,
}

impl MockBackend {
    pub fn suspended() -> Self {
        Self {
            output: Mutex::new(OutputState::Suspended),
            allow_resume: AtomicBool::new(true),
            resume_calls: AtomicUsize::new(0),
            cue_calls: AtomicUsize::new(0),
            media_rejections: AtomicUsize::new(0),
            hold_media: AtomicUsize::new(0),
            media_release: Notify::new(),
            decode_fail: AtomicBool::new(false),
            started: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, kind: StartKind, label: String) -> Box<dyn PlaybackHandle> {
        let stopped = Arc::new(AtomicBool::new(false));
        let finished = Arc::new(AtomicBool::new(false));
        self.started.lock().unwrap().push(StartRecord {
            kind,
            label,
            stopped: Arc::clone(&stopped),
            finished: Arc::clone(&finished),
        });
        Box::new(MockHandle { stopped, finished })
    }

    /// Handles that are neither stopped nor finished
    pub fn alive(&self) -> usize {
        self.started
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !r.stopped.load(Ordering::SeqCst) && !r.finished.load(Ordering::SeqCst))
            .count()
    }

    /// Mark the most recent handle as naturally finished
    pub fn finish_last(&self) {
        let records = self.started.lock().unwrap();
        records
            .last()
            .expect("no handle started")
            .finished
            .store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AudioBackend for MockBackend {
    fn output_state(&self) -> OutputState {
        *self.output.lock().unwrap()
    }

    async fn resume_output(&self) -> Result<()> {
        self.resume_calls.fetch_add(1, Ordering::SeqCst);
        if self.allow_resume.load(Ordering::SeqCst) {
            *self.output.lock().unwrap() = OutputState::Running;
            Ok(())
        } else {
            Err(PlaybackError::PlaybackBlocked)
        }
    }

    async fn decode(&self, bytes: &[u8]) -> Result<PcmClip> {
        if self.decode_fail.load(Ordering::SeqCst) {
            return Err(PlaybackError::DecodeFailure("mock decode failure".into()));
        }
        Ok(PcmClip::new(
            vec![0.0; bytes.len().max(2)],
            ClipFormat::stereo(44_100),
        ))
    }

    fn start_clip(&self, clip: &PcmClip) -> Result<Box<dyn PlaybackHandle>> {
        Ok(self.record(StartKind::Clip, format!("clip:{}", clip.len())))
    }

    async fn start_media(&self, locator: &SoundLocator) -> Result<Box<dyn PlaybackHandle>> {
        if self.hold_media.load(Ordering::SeqCst) > 0 {
            self.hold_media.fetch_sub(1, Ordering::SeqCst);
            self.media_release.notified().await;
        }
        if self.media_rejections.load(Ordering::SeqCst) > 0 {
            self.media_rejections.fetch_sub(1, Ordering::SeqCst);
            return Err(PlaybackError::PlaybackBlocked);
        }
        Ok(self.record(StartKind::Media, locator.to_string()))
    }

    fn play_unlock_cue(&self) {
        self.cue_calls.fetch_add(1, Ordering::SeqCst);
    }
}

// ===== Mock Loader =====

/// Loader that fabricates bytes from the asset path
pub struct MockLoader {
    pub fail: AtomicBool,
}

impl MockLoader {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl SoundLoader for MockLoader {
    async fn load(&self, asset: &Path) -> CoreResult<Vec<u8>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(padboard_core::BoardError::asset(format!(
                "missing asset: {}",
                asset.display()
            )));
        }
        Ok(asset.to_string_lossy().into_owned().into_bytes())
    }
}

// ===== Board Fixture =====

/// A fully wired board over mock platform pieces
pub struct TestBoard {
    pub backend: Arc<MockBackend>,
    pub loader: Arc<MockLoader>,
    pub registry: Arc<Mutex<SoundRegistry>>,
    pub gate: Arc<AudioUnlockGate>,
    pub feedback: Arc<BufferedFeedback>,
    pub engine: Arc<PlaybackEngine>,
    pub replacer: ResourceReplacer,
}

pub fn pad(id: &str) -> PadId {
    PadId::new(id)
}

/// Build a board with the given pads, each bound to `sounds/<id>.mp3`
pub fn board_with_pads(pads: &[&str]) -> TestBoard {
    board_with_config(pads, fast_config())
}

pub fn board_with_config(pads: &[&str], config: BoardConfig) -> TestBoard {
    let backend = Arc::new(MockBackend::suspended());
    let loader = Arc::new(MockLoader::new());
    let feedback = Arc::new(BufferedFeedback::new());

    let registry = Arc::new(Mutex::new(SoundRegistry::new()));
    {
        let mut reg = registry.lock().unwrap();
        for id in pads {
            reg.register(
                PadId::new(*id),
                SoundLocator::bundled(format!("sounds/{id}.mp3")),
            );
        }
    }

    let gate = Arc::new(AudioUnlockGate::new(
        Arc::clone(&backend) as _,
        Arc::clone(&feedback) as _,
    ));
    let engine = Arc::new(PlaybackEngine::new(
        Arc::clone(&backend) as _,
        Arc::clone(&loader) as _,
        Arc::clone(&registry),
        Arc::clone(&gate),
        Arc::clone(&feedback) as _,
        config.clone(),
    ));
    let replacer = ResourceReplacer::new(
        Arc::clone(&registry),
        Arc::clone(&feedback) as _,
        config,
    );

    TestBoard {
        backend,
        loader,
        registry,
        gate,
        feedback,
        engine,
        replacer,
    }
}

/// Default config with a short retry delay so tests stay fast
pub fn fast_config() -> BoardConfig {
    BoardConfig {
        retry_delay_ms: 5,
        ..BoardConfig::default()
    }
}

//! Padboard - Playback Management
//!
//! Platform-agnostic soundboard playback for Padboard.
//!
//! This crate provides:
//! - The tiered playback state machine (decoded clip -> media element ->
//!   unlock-and-retry), with the at-most-one-sound invariant
//! - The audio unlock gate for gesture-gated platforms
//! - The pad-to-sound registry with decoded-clip caching
//! - User sound replacement with size/format validation
//! - Feedback events for key animation and toast messages
//!
//! # Architecture
//!
//! `padboard-playback` is completely platform-agnostic: no DOM, no Web Audio,
//! no audio device dependency. The platform's audio stack is provided via the
//! [`AudioBackend`] and [`SoundLoader`] traits, so the whole state machine can
//! be exercised in tests with mock backends. A later play request always
//! supersedes one still awaiting a platform result - stale results are
//! discarded, never installed.
//!
//! # Example: Registering and Replacing Sounds
//!
//! ```rust
//! use padboard_core::{PadId, SoundLocator};
//! use padboard_playback::{
//!     BoardConfig, BufferedFeedback, PadEvent, ResourceReplacer, SoundRegistry, SoundUpload,
//! };
//! use std::sync::{Arc, Mutex};
//!
//! // Pads come from the static key layout
//! let registry = Arc::new(Mutex::new(SoundRegistry::new()));
//! registry
//!     .lock()
//!     .unwrap()
//!     .register(PadId::new("kick"), SoundLocator::bundled("sounds/kick.mp3"));
//!
//! // The user swaps in their own sound
//! let feedback = Arc::new(BufferedFeedback::new());
//! let replacer =
//!     ResourceReplacer::new(Arc::clone(&registry), feedback.clone(), BoardConfig::default());
//! let upload = SoundUpload::new(vec![0u8; 1024], "audio/mpeg");
//! let id = replacer.submit(&PadId::new("kick"), upload).unwrap();
//!
//! // The UI drains feedback events to animate keys / show toasts
//! for event in feedback.drain() {
//!     if let PadEvent::SoundReplaced { key, resource } = event {
//!         assert_eq!(key, PadId::new("kick"));
//!         assert_eq!(resource, id);
//!     }
//! }
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use padboard_core::{ClipFormat, PadId, PcmClip, SoundLocator};
//! use padboard_playback::{
//!     AudioBackend, AudioUnlockGate, BoardConfig, BufferedFeedback, DiskSoundLoader,
//!     OutputState, PlaybackEngine, PlaybackHandle, Result, SoundRegistry,
//! };
//! use std::sync::{Arc, Mutex};
//!
//! // Bridge to your platform's audio stack
//! struct MyBackend;
//! struct MyHandle;
//!
//! impl PlaybackHandle for MyHandle {
//!     fn stop(&mut self) {}
//!     fn is_finished(&self) -> bool {
//!         false
//!     }
//! }
//!
//! #[async_trait]
//! impl AudioBackend for MyBackend {
//!     fn output_state(&self) -> OutputState {
//!         OutputState::Suspended
//!     }
//!
//!     async fn resume_output(&self) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     async fn decode(&self, _bytes: &[u8]) -> Result<PcmClip> {
//!         Ok(PcmClip::new(Vec::new(), ClipFormat::stereo(44_100)))
//!     }
//!
//!     fn start_clip(&self, _clip: &PcmClip) -> Result<Box<dyn PlaybackHandle>> {
//!         Ok(Box::new(MyHandle))
//!     }
//!
//!     async fn start_media(&self, _locator: &SoundLocator) -> Result<Box<dyn PlaybackHandle>> {
//!         Ok(Box::new(MyHandle))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = Arc::new(MyBackend);
//!     let feedback = Arc::new(BufferedFeedback::new());
//!     let registry = Arc::new(Mutex::new(SoundRegistry::new()));
//!     registry
//!         .lock()
//!         .unwrap()
//!         .register(PadId::new("pad-1"), SoundLocator::bundled("sounds/1.mp3"));
//!
//!     let gate = Arc::new(AudioUnlockGate::new(backend.clone(), feedback.clone()));
//!     let engine = PlaybackEngine::new(
//!         backend,
//!         Arc::new(DiskSoundLoader::new("assets/sounds")),
//!         Arc::clone(&registry),
//!         Arc::clone(&gate),
//!         feedback.clone(),
//!         BoardConfig::default(),
//!     );
//!
//!     // First user gesture unlocks the output, then pads play
//!     gate.attempt_unlock().await;
//!     engine.play(&PadId::new("pad-1")).await.ok();
//!
//!     // The host's periodic tick reaps finished sounds and drains events
//!     let _finished = engine.reap_finished();
//!     let _events = feedback.drain();
//! }
//! ```

mod engine;
mod error;
mod events;
mod loader;
mod platform;
mod registry;
mod replacer;
pub mod types;
mod unlock;

// Public exports
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::{BufferedFeedback, FeedbackSink, PadEvent};
pub use loader::DiskSoundLoader;
pub use platform::{AudioBackend, OutputState, PlaybackHandle};
pub use registry::SoundRegistry;
pub use replacer::ResourceReplacer;
pub use types::{BoardConfig, PlayOutcome, PlaybackTier, SoundUpload};
pub use unlock::{AudioUnlockGate, UnlockResult, UnlockState};

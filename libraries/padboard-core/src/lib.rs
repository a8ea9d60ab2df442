//! Padboard Core
//!
//! Platform-agnostic core types, traits, and error handling for Padboard.
//!
//! This crate provides the foundational building blocks shared by the
//! playback engine and any host application:
//! - **Domain Types**: `PadId`, `SoundLocator`, `SoundResource`, `PcmClip`
//! - **Core Traits**: `SoundLoader`
//! - **Error Handling**: Unified `BoardError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use padboard_core::{PadId, ResourceId, SoundLocator, SoundResource};
//!
//! // A pad from the static key layout
//! let pad = PadId::new("pad-3");
//!
//! // Its bundled default sound
//! let resource = SoundResource::bundled_default(SoundLocator::bundled("sounds/airhorn.mp3"));
//! assert!(!resource.is_replaced());
//!
//! // A user replacement gets a generated id
//! let replacement = SoundLocator::memory(ResourceId::generate(), vec![0u8; 16], "audio/mpeg");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{BoardError, Result};
pub use traits::SoundLoader;
pub use types::{ClipFormat, PadId, PcmClip, ResourceId, SoundLocator, SoundResource, SourceKind};

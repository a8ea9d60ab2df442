//! Domain types for Padboard

mod clip;
mod ids;
mod resource;

pub use clip::{ClipFormat, PcmClip};
pub use ids::{PadId, ResourceId};
pub use resource::{SoundLocator, SoundResource, SourceKind};

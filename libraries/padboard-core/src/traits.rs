/// Platform traits for Padboard
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Bundled-asset loader
///
/// Implementers resolve a bundled sound's asset path into raw file bytes.
/// This trait keeps the registry and playback engine free of any direct
/// filesystem or network access; platforms supply a loader for wherever the
/// sound bundle actually lives.
#[async_trait]
pub trait SoundLoader: Send + Sync {
    /// Load the raw bytes of a bundled asset
    ///
    /// # Errors
    /// Returns an error if the asset cannot be found or read
    async fn load(&self, asset: &Path) -> Result<Vec<u8>>;
}

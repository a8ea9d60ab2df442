//! Disk-backed sound loader

use async_trait::async_trait;
use padboard_core::{Result, SoundLoader};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Loads bundled sound assets from a directory on disk
///
/// Relative asset paths resolve under the bundle root; absolute paths are
/// used as-is.
#[derive(Debug, Clone)]
pub struct DiskSoundLoader {
    base_path: PathBuf,
}

impl DiskSoundLoader {
    /// Create a loader rooted at the sound bundle directory
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

#[async_trait]
impl SoundLoader for DiskSoundLoader {
    async fn load(&self, asset: &Path) -> Result<Vec<u8>> {
        let path = if asset.is_absolute() {
            asset.to_path_buf()
        } else {
            self.base_path.join(asset)
        };
        Ok(fs::read(&path).await?)
    }
}

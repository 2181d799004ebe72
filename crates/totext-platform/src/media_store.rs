use std::path::{Path, PathBuf};

use async_trait::async_trait;
use totext_config::storage::StorageConfig;
use totext_types::{ImageMetadata, ImageReference};

use crate::PlatformError;

/// Hands out writable destinations for new images
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn allocate(&self, metadata: &ImageMetadata) -> Result<ImageReference, PlatformError>;

    /// Drop a destination that never received an image
    async fn release(&self, image: &ImageReference) -> Result<(), PlatformError>;
}

/// Captures stored as files in a local directory, metadata in a JSON sidecar
pub struct LocalMediaStore {
    dir: PathBuf,
}

impl LocalMediaStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            dir: config.media_dir.clone(),
        }
    }

    fn sidecar(path: &Path) -> PathBuf {
        path.with_extension("json")
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn allocate(&self, metadata: &ImageMetadata) -> Result<ImageReference, PlatformError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(format!("IMG_{}.jpg", uuid::Uuid::new_v4().simple()));
        tokio::fs::write(Self::sidecar(&path), serde_json::to_vec_pretty(metadata)?).await?;

        tracing::debug!("Allocated {}", path.display());
        Ok(ImageReference::new(path))
    }

    async fn release(&self, image: &ImageReference) -> Result<(), PlatformError> {
        for path in [image.path().to_path_buf(), Self::sidecar(image.path())] {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        tracing::debug!("Released {}", image);
        Ok(())
    }
}

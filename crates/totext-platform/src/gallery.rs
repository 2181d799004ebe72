use std::path::PathBuf;

use async_trait::async_trait;
use rfd::AsyncFileDialog;
use totext_config::storage::StorageConfig;
use totext_types::ImageReference;

use crate::{Outcome, PlatformError};

/// Lets the user choose an existing image
#[async_trait]
pub trait GalleryActivity: Send + Sync {
    async fn pick(&self, mime: &str) -> Result<Outcome<ImageReference>, PlatformError>;
}

/// Native file dialog
pub struct DialogGallery {
    start_dir: PathBuf,
}

impl DialogGallery {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            start_dir: config.gallery_dir.clone(),
        }
    }
}

#[async_trait]
impl GalleryActivity for DialogGallery {
    async fn pick(&self, mime: &str) -> Result<Outcome<ImageReference>, PlatformError> {
        let extensions = extensions_for_mime(mime);
        let mut dialog = AsyncFileDialog::new()
            .set_title("Pick an image")
            .add_filter("Images", &extensions[..]);
        if self.start_dir.is_dir() {
            dialog = dialog.set_directory(&self.start_dir);
        }

        Ok(match dialog.pick_file().await {
            Some(handle) => Outcome::Completed(ImageReference::new(handle.path())),
            None => Outcome::Cancelled,
        })
    }
}

/// File extensions accepted for an image mime filter
pub fn extensions_for_mime(mime: &str) -> Vec<&'static str> {
    match mime {
        "image/png" => vec!["png"],
        "image/jpeg" => vec!["jpg", "jpeg"],
        "image/gif" => vec!["gif"],
        "image/bmp" => vec!["bmp"],
        "image/webp" => vec!["webp"],
        "image/tiff" => vec!["tif", "tiff"],
        _ => vec![
            "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "pnm",
        ],
    }
}

use std::sync::Arc;

use totext_platform::{CameraActivity, GalleryActivity, MediaStore, Outcome};
use totext_types::{ImageMetadata, ImageReference, ImageSource};

/// Mime filter handed to the gallery
pub const IMAGE_MIME: &str = "image/*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(ImageReference),
    Cancelled,
    /// Camera destination could not be allocated
    Failed(String),
}

#[derive(Clone)]
pub struct ImageSourcePicker {
    media: Arc<dyn MediaStore>,
    camera: Arc<dyn CameraActivity>,
    gallery: Arc<dyn GalleryActivity>,
}

impl ImageSourcePicker {
    pub fn new(
        media: Arc<dyn MediaStore>,
        camera: Arc<dyn CameraActivity>,
        gallery: Arc<dyn GalleryActivity>,
    ) -> Self {
        Self {
            media,
            camera,
            gallery,
        }
    }

    pub fn choices(&self) -> Vec<ImageSource> {
        ImageSource::ALL.to_vec()
    }

    /// Allocate a destination, then let the camera fill it.
    /// An unused destination is released again.
    pub async fn capture_from_camera(&self) -> PickOutcome {
        let destination = match self.media.allocate(&ImageMetadata::default()).await {
            Ok(destination) => destination,
            Err(e) => {
                tracing::error!("Failed to allocate capture destination: {}", e);
                return PickOutcome::Failed(e.to_string());
            }
        };

        match self.camera.capture(&destination).await {
            Ok(Outcome::Completed(())) => {
                tracing::info!("Captured {}", destination);
                PickOutcome::Picked(destination)
            }
            Ok(Outcome::Cancelled) => {
                self.release(&destination).await;
                PickOutcome::Cancelled
            }
            Err(e) => {
                tracing::warn!("Camera failed: {}", e);
                self.release(&destination).await;
                PickOutcome::Cancelled
            }
        }
    }

    pub async fn pick_from_gallery(&self) -> PickOutcome {
        match self.gallery.pick(IMAGE_MIME).await {
            Ok(Outcome::Completed(image)) => {
                tracing::info!("Picked {}", image);
                PickOutcome::Picked(image)
            }
            Ok(Outcome::Cancelled) => PickOutcome::Cancelled,
            Err(e) => {
                tracing::warn!("Gallery failed: {}", e);
                PickOutcome::Cancelled
            }
        }
    }

    async fn release(&self, destination: &ImageReference) {
        if let Err(e) = self.media.release(destination).await {
            tracing::warn!("Failed to release {}: {}", destination, e);
        }
    }
}

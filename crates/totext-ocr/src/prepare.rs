use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use totext_types::ImageReference;

use crate::OcrError;

/// Decoded image ready to hand to an engine
pub struct PreparedImage {
    pub source: ImageReference,
    pub image: DynamicImage,
}

impl PreparedImage {
    pub fn to_png(&self) -> Result<Vec<u8>, OcrError> {
        encode_png(&self.image)
    }
}

/// Load the referenced file into memory
pub fn prepare_image(reference: &ImageReference) -> Result<PreparedImage, OcrError> {
    let image = image::open(reference.path())?;
    tracing::debug!(
        "Prepared {} ({}x{})",
        reference,
        image.width(),
        image.height()
    );

    Ok(PreparedImage {
        source: reference.clone(),
        image,
    })
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, OcrError> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

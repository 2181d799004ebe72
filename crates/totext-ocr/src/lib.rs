mod invoker;
mod ocr;
mod prepare;

pub use invoker::OcrInvoker;
pub use ocr::{OcrEngine, TesseractEngine};
pub use prepare::{PreparedImage, prepare_image};

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Engine(String),
}

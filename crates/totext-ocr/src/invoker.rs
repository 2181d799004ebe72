use std::sync::Arc;

use totext_types::{FailureStage, ImageReference, RecognitionResult};

use crate::{OcrEngine, OcrError, PreparedImage, prepare_image};

/// Single-attempt recognition over an [`OcrEngine`].
///
/// No retries and no timeout. Callers must only pass a reference to an
/// image the user actually selected.
#[derive(Clone)]
pub struct OcrInvoker {
    engine: Arc<dyn OcrEngine>,
}

impl OcrInvoker {
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self { engine }
    }

    /// Decode the image off the async workers
    pub async fn prepare(&self, image: &ImageReference) -> Result<PreparedImage, OcrError> {
        let image = image.clone();
        tokio::task::spawn_blocking(move || prepare_image(&image))
            .await
            .map_err(|e| OcrError::Engine(format!("image preparation task failed: {e}")))?
    }

    pub async fn recognize_prepared(&self, image: PreparedImage) -> RecognitionResult {
        match self.engine.recognize(&image).await {
            Ok(text) => {
                tracing::debug!("{} recognized {} chars", self.engine.name(), text.len());
                RecognitionResult::Success(text)
            }
            Err(e) => {
                tracing::error!("{} failed on {}: {}", self.engine.name(), image.source, e);
                RecognitionResult::Failure {
                    stage: FailureStage::Recognize,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Prepare then recognize in one go
    pub async fn recognize(&self, image: &ImageReference) -> RecognitionResult {
        match self.prepare(image).await {
            Ok(prepared) => self.recognize_prepared(prepared).await,
            Err(e) => {
                tracing::error!("Failed to prepare {}: {}", image, e);
                RecognitionResult::Failure {
                    stage: FailureStage::Prepare,
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use image::{Rgb, RgbImage};

    struct FixedEngine(Result<&'static str, &'static str>);

    #[async_trait]
    impl OcrEngine for FixedEngine {
        async fn recognize(&self, _image: &PreparedImage) -> Result<String, OcrError> {
            self.0
                .map(String::from)
                .map_err(|e| OcrError::Engine(e.to_string()))
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn sample_image(dir: &tempfile::TempDir) -> ImageReference {
        let path = dir.path().join("sample.png");
        RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])).save(&path).unwrap();
        ImageReference::new(path)
    }

    #[tokio::test]
    async fn test_recognize_success() {
        let dir = tempfile::tempdir().unwrap();
        let invoker = OcrInvoker::new(Arc::new(FixedEngine(Ok("HELLO"))));

        let result = invoker.recognize(&sample_image(&dir)).await;
        assert_eq!(result, RecognitionResult::Success("HELLO".to_string()));
    }

    #[tokio::test]
    async fn test_engine_error_is_recognize_failure() {
        let dir = tempfile::tempdir().unwrap();
        let invoker = OcrInvoker::new(Arc::new(FixedEngine(Err("model missing"))));

        let result = invoker.recognize(&sample_image(&dir)).await;
        assert_eq!(
            result,
            RecognitionResult::Failure {
                stage: FailureStage::Recognize,
                reason: "model missing".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_unreadable_file_is_prepare_failure() {
        let dir = tempfile::tempdir().unwrap();
        let invoker = OcrInvoker::new(Arc::new(FixedEngine(Ok("never"))));
        let missing = ImageReference::new(dir.path().join("gone.jpg"));

        match invoker.recognize(&missing).await {
            RecognitionResult::Failure { stage, .. } => assert_eq!(stage, FailureStage::Prepare),
            other => panic!("expected prepare failure, got {other:?}"),
        }
    }
}

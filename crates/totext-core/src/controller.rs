use std::sync::Arc;

use kanal::AsyncSender;
use totext_ocr::OcrInvoker;
use totext_platform::ClipboardAccess;
use totext_types::{
    AppEvent, FailureStage, GrantResults, ImageReference, ImageSource, RecognitionResult,
    RequestCode, UiEvent,
};

use crate::permission::PermissionGate;
use crate::picker::{ImageSourcePicker, PickOutcome};
use crate::state::ScreenState;

pub const PICK_IMAGE_FIRST: &str = "Pick Image First...";
pub const CAMERA_CANCELLED: &str = "Cancelled...";
pub const GALLERY_CANCELLED: &str = "Cancelled...!";
pub const CAMERA_PERMISSIONS_REQUIRED: &str = "Camera & Storage permissions are required...";
pub const STORAGE_PERMISSION_REQUIRED: &str = "Storage permission is required...";
pub const PREPARING_IMAGE: &str = "Preparing Image";
pub const RECOGNIZING_TEXT: &str = "Recognizing text...";
pub const TEXT_COPIED: &str = "Text copied";
pub const NOTHING_TO_COPY: &str = "No text to copy";

/// Services the controller drives
pub struct Services {
    pub permissions: PermissionGate,
    pub picker: ImageSourcePicker,
    pub ocr: OcrInvoker,
    pub clipboard: Arc<dyn ClipboardAccess>,
}

/// Owns the screen state and sequences pick -> recognize -> display.
///
/// Events are handled one at a time; every suspension (prompt, picker,
/// camera, OCR) is awaited in place so results apply in order.
pub struct ScreenController {
    state: ScreenState,
    services: Services,
    progress_title: String,
    ui_tx: AsyncSender<AppEvent>,
}

impl ScreenController {
    pub fn new(
        services: Services,
        progress_title: impl Into<String>,
        ui_tx: AsyncSender<AppEvent>,
    ) -> Self {
        Self {
            state: ScreenState::default(),
            services,
            progress_title: progress_title.into(),
            ui_tx,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub async fn handle(&mut self, event: UiEvent) -> anyhow::Result<()> {
        tracing::debug!("[{:?}] handling {:?}", self.state.phase(), event);
        match event {
            UiEvent::InputImage => self.present_choice().await?,
            UiEvent::SourceChosen(source) => self.on_source_chosen(source).await?,
            UiEvent::ChoiceDismissed => {
                tracing::debug!("Source choice dismissed");
            }
            UiEvent::Recognize => self.recognize().await?,
            UiEvent::TextEdited(text) => {
                self.state.recognized_text = text;
            }
            UiEvent::CopyText => self.copy_text().await?,
            UiEvent::Close => {
                // Handled by the event loop
            }
        }
        Ok(())
    }

    async fn present_choice(&self) -> anyhow::Result<()> {
        self.emit(AppEvent::PresentSourceChoice(self.services.picker.choices()))
            .await
    }

    async fn on_source_chosen(&mut self, source: ImageSource) -> anyhow::Result<()> {
        match source {
            ImageSource::Camera => {
                if self.services.permissions.camera_ready() {
                    self.capture_from_camera().await
                } else {
                    let results = self.services.permissions.request(RequestCode::Camera).await;
                    self.on_permission_result(results).await
                }
            }
            ImageSource::Gallery => {
                if self.services.permissions.storage_ready() {
                    self.pick_from_gallery().await
                } else {
                    let results = self.services.permissions.request(RequestCode::Storage).await;
                    self.on_permission_result(results).await
                }
            }
        }
    }

    /// Continue the flow a permission request was made for
    pub async fn on_permission_result(&mut self, results: GrantResults) -> anyhow::Result<()> {
        if results.is_empty() {
            tracing::warn!("No decision made for {:?} request", results.code);
            return Ok(());
        }

        match results.code {
            RequestCode::Camera => {
                if results.all_granted() {
                    self.capture_from_camera().await
                } else {
                    self.notice(CAMERA_PERMISSIONS_REQUIRED).await
                }
            }
            RequestCode::Storage => {
                if results.all_granted() {
                    self.pick_from_gallery().await
                } else {
                    self.notice(STORAGE_PERMISSION_REQUIRED).await
                }
            }
        }
    }

    async fn capture_from_camera(&mut self) -> anyhow::Result<()> {
        match self.services.picker.capture_from_camera().await {
            PickOutcome::Picked(image) => self.select_image(image).await,
            PickOutcome::Cancelled => self.notice(CAMERA_CANCELLED).await,
            PickOutcome::Failed(reason) => {
                self.notice(&format!("Failed to prepare camera due to {reason}"))
                    .await
            }
        }
    }

    async fn pick_from_gallery(&mut self) -> anyhow::Result<()> {
        match self.services.picker.pick_from_gallery().await {
            PickOutcome::Picked(image) => self.select_image(image).await,
            PickOutcome::Cancelled | PickOutcome::Failed(_) => {
                self.notice(GALLERY_CANCELLED).await
            }
        }
    }

    async fn select_image(&mut self, image: ImageReference) -> anyhow::Result<()> {
        self.state.selected_image = Some(image.clone());
        self.emit(AppEvent::ShowImage(image)).await
    }

    async fn recognize(&mut self) -> anyhow::Result<()> {
        let Some(image) = self.state.selected_image.clone() else {
            return self.notice(PICK_IMAGE_FIRST).await;
        };

        self.state.busy = true;
        self.emit(AppEvent::ShowProgress {
            title: self.progress_title.clone(),
            message: PREPARING_IMAGE.to_string(),
        })
        .await?;

        let result = match self.services.ocr.prepare(&image).await {
            Ok(prepared) => {
                self.emit(AppEvent::UpdateProgress(RECOGNIZING_TEXT.to_string()))
                    .await?;
                self.services.ocr.recognize_prepared(prepared).await
            }
            Err(e) => {
                tracing::error!("Failed to prepare {}: {}", image, e);
                RecognitionResult::Failure {
                    stage: FailureStage::Prepare,
                    reason: e.to_string(),
                }
            }
        };

        // Single dismissal point for every outcome
        self.state.busy = false;
        self.emit(AppEvent::DismissProgress).await?;

        match result {
            RecognitionResult::Success(text) => {
                tracing::info!("Recognized {} chars", text.len());
                self.state.recognized_text = text.clone();
                self.emit(AppEvent::SetRecognizedText(text)).await
            }
            RecognitionResult::Failure { stage, reason } => {
                self.notice(&RecognitionResult::failure_notice(stage, &reason))
                    .await
            }
        }
    }

    async fn copy_text(&self) -> anyhow::Result<()> {
        if self.state.recognized_text.is_empty() {
            return self.notice(NOTHING_TO_COPY).await;
        }

        match self
            .services
            .clipboard
            .set_text(&self.state.recognized_text)
            .await
        {
            Ok(()) => self.notice(TEXT_COPIED).await,
            Err(e) => {
                tracing::warn!("Clipboard write failed: {}", e);
                self.notice(&format!("Failed to copy text due to {e}"))
                    .await
            }
        }
    }

    async fn notice(&self, message: &str) -> anyhow::Result<()> {
        tracing::debug!("Notice: {}", message);
        self.emit(AppEvent::Notice(message.to_string())).await
    }

    async fn emit(&self, event: AppEvent) -> anyhow::Result<()> {
        self.ui_tx.send(event).await?;
        Ok(())
    }
}

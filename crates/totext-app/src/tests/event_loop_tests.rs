use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use image::{Rgb, RgbImage};
use tokio_util::sync::CancellationToken;
use totext_config::Config;
use totext_core::controller::{PICK_IMAGE_FIRST, RECOGNIZING_TEXT};
use totext_core::{ImageSourcePicker, PermissionGate, ScreenController, Services};
use totext_ocr::{OcrEngine, OcrError, OcrInvoker, PreparedImage};
use totext_platform::{
    CommandCamera, DesktopCapabilities, DialogPrompter, GalleryActivity, LocalMediaStore, Outcome,
    PlatformError, SystemClipboard,
};
use totext_types::{AppEvent, Capability, ImageReference, ImageSource, UiEvent};

use crate::events::{build_controller, event_loop, probe_engine};

fn sandboxed_config(dir: &tempfile::TempDir) -> Config {
    let mut config = Config::default();
    config.storage.media_dir = dir.path().join("media");
    config.storage.gallery_dir = dir.path().to_path_buf();
    config.permissions.grants_file = dir.path().join("grants.json");
    config.ocr.tesseract_path = dir.path().join("no-such-tesseract").display().to_string();
    config
}

#[tokio::test]
async fn test_close_stops_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let (app_tx, _app_rx) = kanal::bounded_async(16);
    let (ui_tx, ui_rx) = kanal::bounded_async(16);

    let controller = build_controller(&sandboxed_config(&dir), app_tx);
    let task = tokio::spawn(event_loop(controller, ui_rx, CancellationToken::new()));

    ui_tx.send(UiEvent::Close).await.unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cancel_stops_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let (app_tx, _app_rx) = kanal::bounded_async(16);
    let (_ui_tx, ui_rx) = kanal::bounded_async::<UiEvent>(16);
    let cancel = CancellationToken::new();

    let controller = build_controller(&sandboxed_config(&dir), app_tx);
    let task = tokio::spawn(event_loop(controller, ui_rx, cancel.clone()));

    cancel.cancel();
    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_closed_ui_channel_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let (app_tx, _app_rx) = kanal::bounded_async(16);
    let (ui_tx, ui_rx) = kanal::bounded_async::<UiEvent>(16);

    let controller = build_controller(&sandboxed_config(&dir), app_tx);
    drop(ui_tx);

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        event_loop(controller, ui_rx, CancellationToken::new()),
    )
    .await
    .unwrap();
    assert!(result.is_err());
}

#[tokio::test]
async fn test_events_reach_the_screen_controller() {
    let dir = tempfile::tempdir().unwrap();
    let (app_tx, app_rx) = kanal::bounded_async(16);
    let (ui_tx, ui_rx) = kanal::bounded_async(16);

    let controller = build_controller(&sandboxed_config(&dir), app_tx);
    let task = tokio::spawn(event_loop(controller, ui_rx, CancellationToken::new()));

    ui_tx.send(UiEvent::InputImage).await.unwrap();
    ui_tx.send(UiEvent::Recognize).await.unwrap();
    ui_tx.send(UiEvent::Close).await.unwrap();

    assert_eq!(
        app_rx.recv().await.unwrap(),
        AppEvent::PresentSourceChoice(vec![ImageSource::Camera, ImageSource::Gallery])
    );
    assert_eq!(
        app_rx.recv().await.unwrap(),
        AppEvent::Notice(PICK_IMAGE_FIRST.to_string())
    );

    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_missing_engine_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let (app_tx, app_rx) = kanal::bounded_async(16);

    probe_engine(&sandboxed_config(&dir), &app_tx).await;

    match app_rx.recv().await.unwrap() {
        AppEvent::Notice(text) => assert!(text.starts_with("OCR engine unavailable")),
        other => panic!("unexpected event {other:?}"),
    }
}

/// Engine that never finishes
struct StuckEngine;

#[async_trait]
impl OcrEngine for StuckEngine {
    async fn recognize(&self, _image: &PreparedImage) -> Result<String, OcrError> {
        std::future::pending().await
    }

    fn name(&self) -> &str {
        "stuck"
    }
}

struct FixedGallery(ImageReference);

#[async_trait]
impl GalleryActivity for FixedGallery {
    async fn pick(&self, _mime: &str) -> Result<Outcome<ImageReference>, PlatformError> {
        Ok(Outcome::Completed(self.0.clone()))
    }
}

#[tokio::test]
async fn test_cancel_abandons_running_recognition() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = sandboxed_config(&dir);
    config.permissions.pre_granted = vec![Capability::Storage];

    let path = dir.path().join("page.png");
    RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]))
        .save(&path)
        .unwrap();
    let image = ImageReference::new(&path);

    let services = Services {
        permissions: PermissionGate::new(Arc::new(DesktopCapabilities::load(
            &config.permissions,
            Box::new(DialogPrompter),
        ))),
        picker: ImageSourcePicker::new(
            Arc::new(LocalMediaStore::new(&config.storage)),
            Arc::new(CommandCamera::new(&config.camera)),
            Arc::new(FixedGallery(image.clone())),
        ),
        ocr: OcrInvoker::new(Arc::new(StuckEngine)),
        clipboard: Arc::new(SystemClipboard::spawn()),
    };

    let (app_tx, app_rx) = kanal::bounded_async(16);
    let (ui_tx, ui_rx) = kanal::bounded_async(16);
    let cancel = CancellationToken::new();
    let controller = ScreenController::new(services, "Please wait", app_tx);
    let task = tokio::spawn(event_loop(controller, ui_rx, cancel.clone()));

    ui_tx
        .send(UiEvent::SourceChosen(ImageSource::Gallery))
        .await
        .unwrap();
    assert_eq!(app_rx.recv().await.unwrap(), AppEvent::ShowImage(image));

    ui_tx.send(UiEvent::Recognize).await.unwrap();
    assert!(matches!(
        app_rx.recv().await.unwrap(),
        AppEvent::ShowProgress { .. }
    ));
    assert_eq!(
        app_rx.recv().await.unwrap(),
        AppEvent::UpdateProgress(RECOGNIZING_TEXT.to_string())
    );

    cancel.cancel();
    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());

    // The controller is gone, so whatever is left is all it ever sent
    while let Ok(Some(event)) = app_rx.try_recv() {
        assert!(
            !matches!(event, AppEvent::SetRecognizedText(_) | AppEvent::Notice(_)),
            "unexpected event after cancel: {event:?}"
        );
    }
}

use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use totext_config::Config;
use totext_core::{ImageSourcePicker, PermissionGate, ScreenController, Services};
use totext_ocr::{OcrInvoker, TesseractEngine};
use totext_platform::{
    CommandCamera, DesktopCapabilities, DialogGallery, DialogPrompter, LocalMediaStore,
    SystemClipboard,
};
use totext_types::{AppEvent, UiEvent};

/// Wire the desktop services into a screen controller
pub fn build_controller(config: &Config, app_to_ui_tx: AsyncSender<AppEvent>) -> ScreenController {
    let capabilities = DesktopCapabilities::load(&config.permissions, Box::new(DialogPrompter));
    let picker = ImageSourcePicker::new(
        Arc::new(LocalMediaStore::new(&config.storage)),
        Arc::new(CommandCamera::new(&config.camera)),
        Arc::new(DialogGallery::new(&config.storage)),
    );

    let services = Services {
        permissions: PermissionGate::new(Arc::new(capabilities)),
        picker,
        ocr: OcrInvoker::new(Arc::new(TesseractEngine::new(&config.ocr))),
        clipboard: Arc::new(SystemClipboard::spawn()),
    };

    ScreenController::new(services, config.ui.progress_title.clone(), app_to_ui_tx)
}

/// Check the OCR engine is installed, tell the user if it is not
pub async fn probe_engine(config: &Config, app_to_ui_tx: &AsyncSender<AppEvent>) {
    match TesseractEngine::new(&config.ocr).probe().await {
        Ok(version) => tracing::info!("OCR engine: {}", version),
        Err(e) => {
            tracing::warn!("OCR engine unavailable: {}", e);
            let _ = app_to_ui_tx
                .send(AppEvent::Notice(format!("OCR engine unavailable: {e}")))
                .await;
        }
    }
}

/// App's main loop, one UI event at a time
pub async fn event_loop(
    mut controller: ScreenController,
    ui_to_app_rx: AsyncReceiver<UiEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Shutdown requested");
                break;
            }
            event = ui_to_app_rx.recv() => event?,
        };

        if event == UiEvent::Close {
            tracing::info!("[EVENT_LOOP] Window closed");
            break;
        }

        // A result arriving after shutdown is dropped with its future
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::warn!("[EVENT_LOOP] Shutdown while handling {:?}", event);
                break;
            }
            result = controller.handle(event.clone()) => result?,
        }
    }

    Ok(())
}

use std::rc::Rc;

use kanal::{AsyncReceiver, AsyncSender};
use slint::{CloseRequestResponse, ComponentHandle};
use totext_config::ui::UiConfig;
use totext_types::{AppEvent, UiEvent};

mod events;
mod state;

use events::handle_events;
use state::UiState;

slint::include_modules!();

/// Forward a UI event to the backend without blocking the UI thread
fn send(tx: &AsyncSender<UiEvent>, event: UiEvent) {
    let tx = tx.clone();
    if let Err(e) = slint::spawn_local(async move {
        if let Err(e) = tx.send(event).await {
            tracing::error!("[SLINT] Backend gone: {}", e);
        }
    }) {
        tracing::error!("[SLINT] Failed to queue UI event: {}", e);
    }
}

/// Build the window and run the event loop until it closes.
/// Must be called on the main thread.
pub fn run_ui(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<UiEvent>,
    config: &UiConfig,
) -> anyhow::Result<()> {
    let window = AppWindow::new()?;
    let state = Rc::new(UiState::new(config.notice_ms));

    {
        let tx = ui_to_app_tx.clone();
        window.on_input_image(move || send(&tx, UiEvent::InputImage));
    }
    {
        let tx = ui_to_app_tx.clone();
        window.on_recognize(move || send(&tx, UiEvent::Recognize));
    }
    {
        let tx = ui_to_app_tx.clone();
        window.on_copy_text(move || send(&tx, UiEvent::CopyText));
    }
    {
        let tx = ui_to_app_tx.clone();
        window.on_text_edited(move |text| send(&tx, UiEvent::TextEdited(text.to_string())));
    }
    {
        let tx = ui_to_app_tx.clone();
        let weak = window.as_weak();
        let state = state.clone();
        window.on_choice_selected(move |index| {
            if let Some(w) = weak.upgrade() {
                w.set_choice_visible(false);
            }
            match state.choice_at(index) {
                Some(source) => send(&tx, UiEvent::SourceChosen(source)),
                None => tracing::warn!("[SLINT] No choice at index {}", index),
            }
        });
    }
    {
        let tx = ui_to_app_tx.clone();
        let weak = window.as_weak();
        window.on_choice_dismissed(move || {
            if let Some(w) = weak.upgrade() {
                w.set_choice_visible(false);
            }
            send(&tx, UiEvent::ChoiceDismissed);
        });
    }
    {
        let tx = ui_to_app_tx.clone();
        window.window().on_close_requested(move || {
            // Sync send: the event loop is about to stop
            if let Err(e) = tx.as_sync().send(UiEvent::Close) {
                tracing::debug!("[SLINT] Backend already stopped: {}", e);
            }
            CloseRequestResponse::HideWindow
        });
    }

    // Apply backend events on the UI thread
    {
        let weak = window.as_weak();
        let state = state.clone();
        slint::spawn_local(async move {
            while let Ok(event) = app_to_ui_rx.recv().await {
                match weak.upgrade() {
                    Some(window) => handle_events(event, &window, &state),
                    None => break,
                }
            }
            tracing::debug!("[SLINT] Backend channel closed");
        })?;
    }

    window.run()?;
    Ok(())
}

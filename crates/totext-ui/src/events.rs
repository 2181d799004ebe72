use std::rc::Rc;

use slint::{ComponentHandle, Image, ModelRc, SharedString, TimerMode, VecModel};
use totext_types::AppEvent;

use crate::AppWindow;
use crate::state::UiState;

pub fn handle_events(event: AppEvent, window: &AppWindow, state: &UiState) {
    match event {
        AppEvent::BackendReady => {
            tracing::debug!("[SLINT] Backend ready");
            window.set_ready(true);
        }
        AppEvent::PresentSourceChoice(choices) => {
            let labels: Vec<SharedString> = choices.iter().map(|c| c.label().into()).collect();
            *state.choices.borrow_mut() = choices;
            window.set_choice_labels(ModelRc::from(Rc::new(VecModel::from(labels))));
            window.set_choice_visible(true);
        }
        AppEvent::ShowImage(image) => match Image::load_from_path(image.path()) {
            Ok(picture) => {
                tracing::debug!("[SLINT] Showing {}", image);
                window.set_picture(picture);
                window.set_has_picture(true);
            }
            Err(e) => {
                tracing::warn!("[SLINT] Cannot display {}: {:?}", image, e);
                show_notice(window, state, "Image selected but cannot be previewed");
            }
        },
        AppEvent::SetRecognizedText(text) => {
            window.set_recognized_text(text.into());
        }
        AppEvent::ShowProgress { title, message } => {
            window.set_progress_title(title.into());
            window.set_progress_message(message.into());
            window.set_progress_visible(true);
        }
        AppEvent::UpdateProgress(message) => {
            window.set_progress_message(message.into());
        }
        AppEvent::DismissProgress => {
            window.set_progress_visible(false);
        }
        AppEvent::Notice(message) => {
            show_notice(window, state, &message);
        }
    }
}

fn show_notice(window: &AppWindow, state: &UiState, message: &str) {
    window.set_notice(message.into());
    window.set_notice_visible(true);

    let weak = window.as_weak();
    state
        .notice_timer
        .start(TimerMode::SingleShot, state.notice_duration, move || {
            if let Some(w) = weak.upgrade() {
                w.set_notice_visible(false);
            }
        });
}

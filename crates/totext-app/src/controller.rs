use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use totext_types::{AppEvent, UiEvent};

use crate::events::{build_controller, event_loop, probe_engine};
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<UiEvent>, AsyncReceiver<UiEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64),
            ui_to_app: kanal::bounded_async(64),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Channel ends owned by the window
    pub fn ui_endpoints(&self) -> (AsyncReceiver<AppEvent>, AsyncSender<UiEvent>) {
        (
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
        )
    }

    /// Must be called inside a tokio runtime context
    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        let state = self.state.clone();
        let app_to_ui_tx = self.channels.app_to_ui.0.clone();
        let ui_to_app_rx = self.channels.ui_to_app.1.clone();
        let cancel = self.cancel_token.child_token();

        tasks.spawn(async move {
            let controller = {
                let config = state.config.read().await;
                probe_engine(&config, &app_to_ui_tx).await;
                build_controller(&config, app_to_ui_tx.clone())
            };
            app_to_ui_tx.send(AppEvent::BackendReady).await?;

            event_loop(controller, ui_to_app_rx, cancel).await
        });

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

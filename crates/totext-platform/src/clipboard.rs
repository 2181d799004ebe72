use arboard::Clipboard;
use async_trait::async_trait;
use kanal::{Receiver, Sender};

use crate::PlatformError;

#[async_trait]
pub trait ClipboardAccess: Send + Sync {
    async fn set_text(&self, text: &str) -> Result<(), PlatformError>;
}

type Request = (String, Sender<Result<(), PlatformError>>);

/// System clipboard owned by a dedicated thread.
///
/// The thread keeps the clipboard handle alive so copied text survives on
/// platforms where the owning process must keep serving it.
pub struct SystemClipboard {
    tx: Sender<Request>,
}

impl SystemClipboard {
    pub fn spawn() -> Self {
        let (tx, rx) = kanal::bounded::<Request>(8);
        std::thread::Builder::new()
            .name("totext-clipboard".to_string())
            .spawn(move || serve(rx))
            .map_err(|e| tracing::error!("Failed to start clipboard thread: {}", e))
            .ok();

        Self { tx }
    }
}

fn serve(rx: Receiver<Request>) {
    let mut clipboard = match Clipboard::new() {
        Ok(clipboard) => Some(clipboard),
        Err(e) => {
            tracing::warn!("Clipboard not available: {}", e);
            None
        }
    };

    while let Ok((text, reply)) = rx.recv() {
        let result = match clipboard.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text)
                .map_err(|e| PlatformError::Clipboard(e.to_string())),
            None => Err(PlatformError::Clipboard("no clipboard".to_string())),
        };
        let _ = reply.send(result);
    }

    tracing::debug!("Clipboard thread stopping");
}

#[async_trait]
impl ClipboardAccess for SystemClipboard {
    async fn set_text(&self, text: &str) -> Result<(), PlatformError> {
        let (reply_tx, reply_rx) = kanal::bounded(1);
        self.tx
            .as_async()
            .send((text.to_string(), reply_tx))
            .await
            .map_err(|_| PlatformError::Clipboard("clipboard thread stopped".to_string()))?;
        reply_rx
            .as_async()
            .recv()
            .await
            .map_err(|_| PlatformError::Clipboard("clipboard thread stopped".to_string()))?
    }
}

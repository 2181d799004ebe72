pub mod camera;
pub mod clipboard;
pub mod gallery;
pub mod media_store;
pub mod permissions;

pub use camera::{CameraActivity, CommandCamera};
pub use clipboard::{ClipboardAccess, SystemClipboard};
pub use gallery::{DialogGallery, GalleryActivity};
pub use media_store::{LocalMediaStore, MediaStore};
pub use permissions::{CapabilityProvider, DesktopCapabilities, DialogPrompter, Prompter};

/// Result of launching an external activity (camera, picker)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Completed(T),
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("camera command is empty")]
    EmptyCommand,

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

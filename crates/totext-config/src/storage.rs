use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_media_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ToText")
}

fn default_gallery_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Where camera captures are written
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,
    /// Starting directory of the gallery picker
    #[serde(default = "default_gallery_dir")]
    pub gallery_dir: PathBuf,
}

impl StorageConfig {
    pub fn new() -> Self {
        let media_dir = env::var("TOTEXT_MEDIA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_media_dir());
        let gallery_dir = env::var("TOTEXT_GALLERY_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_gallery_dir());

        Self {
            media_dir,
            gallery_dir,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            media_dir: default_media_dir(),
            gallery_dir: default_gallery_dir(),
        }
    }
}

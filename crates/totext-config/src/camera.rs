use std::env;

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the capture destination path
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

fn default_command() -> Vec<String> {
    ["fswebcam", "--no-banner", "-r", "1280x720", OUTPUT_PLACEHOLDER]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CameraConfig {
    /// Program and arguments used to take a picture
    #[serde(default = "default_command")]
    pub command: Vec<String>,
}

impl CameraConfig {
    pub fn new() -> Self {
        // Whitespace separated, no quoting
        let command = env::var("TOTEXT_CAMERA_COMMAND")
            .ok()
            .map(|v| v.split_whitespace().map(String::from).collect::<Vec<_>>())
            .filter(|parts| !parts.is_empty())
            .unwrap_or_else(default_command);

        Self { command }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
        }
    }
}

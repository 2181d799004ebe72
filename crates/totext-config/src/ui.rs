use std::env;

use serde::{Deserialize, Serialize};

fn default_notice_ms() -> u64 {
    2000
}

fn default_progress_title() -> String {
    "Please wait".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// How long a transient notice stays visible
    #[serde(default = "default_notice_ms")]
    pub notice_ms: u64,
    #[serde(default = "default_progress_title")]
    pub progress_title: String,
}

impl UiConfig {
    pub fn new() -> Self {
        let notice_ms = env::var("TOTEXT_NOTICE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_notice_ms);

        Self {
            notice_ms,
            ..Self::default()
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_ms: default_notice_ms(),
            progress_title: default_progress_title(),
        }
    }
}

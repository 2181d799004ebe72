use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use totext_types::Capability;

fn default_grants_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ToText")
        .join("grants.json")
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PermissionConfig {
    /// Remembered prompt decisions
    #[serde(default = "default_grants_file")]
    pub grants_file: PathBuf,
    /// Capabilities treated as granted without asking
    pub pre_granted: Vec<Capability>,
}

impl PermissionConfig {
    pub fn new() -> Self {
        let grants_file = env::var("TOTEXT_GRANTS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_grants_file());

        Self {
            grants_file,
            pre_granted: Vec::new(),
        }
    }
}

impl Default for PermissionConfig {
    fn default() -> Self {
        Self {
            grants_file: default_grants_file(),
            pre_granted: Vec::new(),
        }
    }
}

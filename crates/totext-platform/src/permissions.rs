use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};
use totext_config::permissions::PermissionConfig;
use totext_types::{Capability, GrantResults, RequestCode};

use crate::PlatformError;

/// OS-level capability grants
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// Current grant state, no side effects
    fn check(&self, capability: Capability) -> bool;

    /// Ask the user for every capability of `code`, answers in request order
    async fn request(&self, code: RequestCode) -> GrantResults;
}

/// Asks the user about a single capability.
/// `None` means no answer could be obtained, e.g. the dialog failed to show.
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn ask(&self, capability: Capability) -> Option<bool>;
}

/// Native yes/no dialog
pub struct DialogPrompter;

#[async_trait]
impl Prompter for DialogPrompter {
    async fn ask(&self, capability: Capability) -> Option<bool> {
        let result = AsyncMessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("Permission request")
            .set_description(format!("Allow ToText to access your {}?", capability.label()))
            .set_buttons(MessageButtons::YesNo)
            .show()
            .await;

        match result {
            MessageDialogResult::Yes => Some(true),
            MessageDialogResult::No => Some(false),
            other => {
                tracing::debug!("Permission dialog gave no answer: {:?}", other);
                None
            }
        }
    }
}

/// Desktop grants remembered in a JSON file
pub struct DesktopCapabilities {
    grants: RwLock<HashMap<Capability, bool>>,
    pre_granted: Vec<Capability>,
    grants_file: PathBuf,
    prompter: Box<dyn Prompter>,
}

impl DesktopCapabilities {
    pub fn load(config: &PermissionConfig, prompter: Box<dyn Prompter>) -> Self {
        let grants = match std::fs::read_to_string(&config.grants_file) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                tracing::warn!(
                    "Ignoring unreadable grants file {}: {}",
                    config.grants_file.display(),
                    e
                );
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        Self {
            grants: RwLock::new(grants),
            pre_granted: config.pre_granted.clone(),
            grants_file: config.grants_file.clone(),
            prompter,
        }
    }

    async fn persist(&self) -> Result<(), PlatformError> {
        let data = {
            let grants = self.grants.read().unwrap_or_else(|e| e.into_inner());
            serde_json::to_string_pretty(&*grants)?
        };
        if let Some(parent) = self.grants_file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.grants_file, data).await?;
        Ok(())
    }
}

#[async_trait]
impl CapabilityProvider for DesktopCapabilities {
    fn check(&self, capability: Capability) -> bool {
        if self.pre_granted.contains(&capability) {
            return true;
        }
        let grants = self.grants.read().unwrap_or_else(|e| e.into_inner());
        grants.get(&capability).copied().unwrap_or(false)
    }

    async fn request(&self, code: RequestCode) -> GrantResults {
        let mut granted = Vec::with_capacity(code.capabilities().len());
        let mut answered = Vec::new();

        for capability in code.capabilities() {
            if self.check(*capability) {
                granted.push(true);
                continue;
            }

            match self.prompter.ask(*capability).await {
                Some(answer) => {
                    tracing::info!("User answered {} for {}", answer, capability.label());
                    answered.push((*capability, answer));
                    granted.push(answer);
                }
                // Earlier answers of this request are discarded
                None => return GrantResults::no_decision(code),
            }
        }

        if !answered.is_empty() {
            self.grants
                .write()
                .unwrap_or_else(|e| e.into_inner())
                .extend(answered);

            if let Err(e) = self.persist().await {
                tracing::warn!("Failed to save grants: {}", e);
            }
        }

        GrantResults::new(code, granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replays scripted answers, then stops deciding
    struct Scripted {
        answers: Mutex<Vec<Option<bool>>>,
    }

    impl Scripted {
        fn new(answers: Vec<Option<bool>>) -> Self {
            Self {
                answers: Mutex::new(answers),
            }
        }
    }

    #[async_trait]
    impl Prompter for Scripted {
        async fn ask(&self, _capability: Capability) -> Option<bool> {
            let mut answers = self.answers.lock().unwrap();
            if answers.is_empty() {
                None
            } else {
                answers.remove(0)
            }
        }
    }

    fn config(dir: &tempfile::TempDir) -> PermissionConfig {
        PermissionConfig {
            grants_file: dir.path().join("grants.json"),
            pre_granted: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_camera_request_asks_in_order_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let caps = DesktopCapabilities::load(
            &config(&dir),
            Box::new(Scripted::new(vec![Some(true), Some(false)])),
        );

        let results = caps.request(RequestCode::Camera).await;
        assert_eq!(results.granted, vec![true, false]);
        assert!(caps.check(Capability::Camera));
        assert!(!caps.check(Capability::Storage));

        // A fresh instance sees the saved decisions
        let reloaded = DesktopCapabilities::load(&config(&dir), Box::new(Scripted::new(vec![])));
        assert!(reloaded.check(Capability::Camera));
        assert!(!reloaded.check(Capability::Storage));
    }

    #[tokio::test]
    async fn test_dismissed_prompt_is_no_decision() {
        let dir = tempfile::tempdir().unwrap();
        let caps = DesktopCapabilities::load(&config(&dir), Box::new(Scripted::new(vec![None])));

        let results = caps.request(RequestCode::Storage).await;
        assert!(results.is_empty());
        assert_eq!(results.code, RequestCode::Storage);
        assert!(!caps.check(Capability::Storage));
    }

    #[tokio::test]
    async fn test_granted_capability_is_not_prompted_again() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(&dir);
        cfg.pre_granted = vec![Capability::Storage];
        // Only one answer scripted: storage must not consume a prompt
        let caps = DesktopCapabilities::load(&cfg, Box::new(Scripted::new(vec![Some(true)])));

        assert!(caps.check(Capability::Storage));
        let results = caps.request(RequestCode::Camera).await;
        assert_eq!(results.granted, vec![true, true]);
        assert!(results.all_granted());
    }

    #[tokio::test]
    async fn test_undecided_request_commits_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let caps = DesktopCapabilities::load(
            &config(&dir),
            Box::new(Scripted::new(vec![Some(true), None])),
        );

        let results = caps.request(RequestCode::Camera).await;
        assert!(results.is_empty());
        assert!(!caps.check(Capability::Camera));
        assert!(!dir.path().join("grants.json").exists());

        let reloaded = DesktopCapabilities::load(&config(&dir), Box::new(Scripted::new(vec![])));
        assert!(!reloaded.check(Capability::Camera));
    }

    #[test]
    fn test_corrupt_grants_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("grants.json"), "{not json").unwrap();

        let caps = DesktopCapabilities::load(&config(&dir), Box::new(Scripted::new(vec![])));
        assert!(!caps.check(Capability::Camera));
    }
}

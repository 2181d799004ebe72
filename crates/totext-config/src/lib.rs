use serde::{Deserialize, Serialize};

use self::camera::{CameraConfig, OUTPUT_PLACEHOLDER};
use self::ocr::OcrConfig;
use self::permissions::PermissionConfig;
use self::storage::StorageConfig;
use self::ui::UiConfig;

pub mod camera;
pub mod ocr;
pub mod permissions;
pub mod storage;
pub mod ui;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OCR language must not be empty")]
    EmptyLanguage,

    #[error("camera command must not be empty")]
    EmptyCameraCommand,

    #[error("camera command must contain the {{output}} placeholder")]
    MissingOutputPlaceholder,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ocr: OcrConfig,
    pub camera: CameraConfig,
    pub storage: StorageConfig,
    pub permissions: PermissionConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        Config {
            ocr: OcrConfig::new(),
            camera: CameraConfig::new(),
            storage: StorageConfig::new(),
            permissions: PermissionConfig::new(),
            ui: UiConfig::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ocr.language.trim().is_empty() {
            return Err(ConfigError::EmptyLanguage);
        }
        if self.camera.command.is_empty() {
            return Err(ConfigError::EmptyCameraCommand);
        }
        if !self
            .camera
            .command
            .iter()
            .any(|arg| arg.contains(OUTPUT_PLACEHOLDER))
        {
            return Err(ConfigError::MissingOutputPlaceholder);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use totext_types::Capability;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ui.progress_title, "Please wait");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "ocr": { "language": "deu" }, "permissions": { "pre_granted": ["storage"] } }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.ocr.language, "deu");
        assert_eq!(config.ocr.tesseract_path, "tesseract");
        assert_eq!(config.permissions.pre_granted, vec![Capability::Storage]);
        assert_eq!(config.ui.notice_ms, 2000);
        assert!(config.camera.command.iter().any(|a| a == OUTPUT_PLACEHOLDER));
    }

    #[test]
    fn test_camera_command_without_placeholder_is_rejected() {
        let mut config = Config::default();
        config.camera.command = vec!["fswebcam".to_string(), "out.jpg".to_string()];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingOutputPlaceholder)
        ));

        config.camera.command.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyCameraCommand)
        ));
    }

    #[test]
    fn test_blank_language_is_rejected() {
        let mut config = Config::default();
        config.ocr.language = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyLanguage)));
    }
}

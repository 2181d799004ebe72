use std::env;

use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "eng".to_string()
}

fn default_tesseract_path() -> String {
    "tesseract".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language code(s), e.g. "eng" or "eng+deu"
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_tesseract_path")]
    pub tesseract_path: String,
    /// Extra arguments appended after the language flag
    pub extra_args: Vec<String>,
}

impl OcrConfig {
    pub fn new() -> Self {
        let language = env::var("TOTEXT_OCR_LANGUAGE").unwrap_or_else(|_| default_language());
        let tesseract_path =
            env::var("TOTEXT_TESSERACT_PATH").unwrap_or_else(|_| default_tesseract_path());

        Self {
            language,
            tesseract_path,
            extra_args: Vec::new(),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            tesseract_path: default_tesseract_path(),
            extra_args: Vec::new(),
        }
    }
}

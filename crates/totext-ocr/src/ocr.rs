use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use totext_config::ocr::OcrConfig;

use crate::{OcrError, PreparedImage};

/// Text recognition backend
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize plain text in an in-memory image
    async fn recognize(&self, image: &PreparedImage) -> Result<String, OcrError>;

    /// Engine name for logs
    fn name(&self) -> &str;
}

/// Tesseract via its command line, image piped over stdin
pub struct TesseractEngine {
    program: String,
    language: String,
    extra_args: Vec<String>,
}

impl TesseractEngine {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            program: config.tesseract_path.clone(),
            language: config.language.clone(),
            extra_args: config.extra_args.clone(),
        }
    }

    /// First line of `tesseract --version`
    pub async fn probe(&self) -> Result<String, OcrError> {
        let output = Command::new(&self.program)
            .arg("--version")
            .output()
            .await
            .map_err(|source| OcrError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Older releases print the version on stderr
        let text = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };

        Ok(text.lines().next().unwrap_or_default().trim().to_string())
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn recognize(&self, image: &PreparedImage) -> Result<String, OcrError> {
        let png = image.to_png()?;
        tracing::debug!(
            "Running {} on {} ({} bytes, lang {})",
            self.program,
            image.source,
            png.len(),
            self.language
        );

        let mut child = Command::new(&self.program)
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .args(&self.extra_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| OcrError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| OcrError::Engine("stdin not captured".to_string()))?;

        let feed = async move {
            stdin.write_all(&png).await?;
            stdin.shutdown().await
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;
        fed?;

        if !output.status.success() {
            return Err(OcrError::Engine(format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(clean_output(&String::from_utf8_lossy(&output.stdout)))
    }

    fn name(&self) -> &str {
        "Tesseract OCR"
    }
}

/// Strip the trailing page break and blank lines tesseract appends
fn clean_output(raw: &str) -> String {
    raw.trim_end_matches(|c: char| c.is_whitespace() || c == '\u{c}')
        .to_string()
}

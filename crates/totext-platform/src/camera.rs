use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use totext_config::camera::{CameraConfig, OUTPUT_PLACEHOLDER};
use totext_types::ImageReference;

use crate::{Outcome, PlatformError};

/// Takes a picture into a destination the caller allocated
#[async_trait]
pub trait CameraActivity: Send + Sync {
    async fn capture(&self, destination: &ImageReference) -> Result<Outcome<()>, PlatformError>;
}

/// Camera driven by an external capture program
pub struct CommandCamera {
    command: Vec<String>,
}

impl CommandCamera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            command: config.command.clone(),
        }
    }

    fn build(&self, destination: &ImageReference) -> Result<Command, PlatformError> {
        let (program, args) = self.command.split_first().ok_or(PlatformError::EmptyCommand)?;
        let output = destination.path().to_string_lossy();

        let mut command = Command::new(program);
        command
            .args(args.iter().map(|arg| arg.replace(OUTPUT_PLACEHOLDER, &output)))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        Ok(command)
    }
}

#[async_trait]
impl CameraActivity for CommandCamera {
    async fn capture(&self, destination: &ImageReference) -> Result<Outcome<()>, PlatformError> {
        let mut command = self.build(destination)?;
        tracing::debug!("Capturing into {}", destination);

        let output = command.output().await.map_err(|source| PlatformError::Spawn {
            program: self.command[0].clone(),
            source,
        })?;

        if !output.status.success() {
            tracing::warn!(
                "Capture command exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(Outcome::Cancelled);
        }

        // Some capture tools exit 0 without writing anything
        match tokio::fs::metadata(destination.path()).await {
            Ok(meta) if meta.len() > 0 => Ok(Outcome::Completed(())),
            _ => {
                tracing::warn!("Capture command produced no image at {}", destination);
                Ok(Outcome::Cancelled)
            }
        }
    }
}

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Events sent from the backend to the window
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    PresentSourceChoice(Vec<ImageSource>),
    ShowImage(ImageReference),
    SetRecognizedText(String),
    ShowProgress { title: String, message: String },
    UpdateProgress(String),
    DismissProgress,
    Notice(String),
    BackendReady,
}

/// Events sent from the window to the backend
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    InputImage,
    SourceChosen(ImageSource),
    ChoiceDismissed,
    Recognize,
    TextEdited(String),
    CopyText,
    Close,
}

/// Handle to a picked or captured image
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageReference(PathBuf);

impl ImageReference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// OS-granted permission gating hardware or storage access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Camera,
    Storage,
}

impl Capability {
    pub fn label(&self) -> &'static str {
        match self {
            Capability::Camera => "camera",
            Capability::Storage => "storage",
        }
    }
}

/// Identifies which flow a permission request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestCode {
    Camera,
    Storage,
}

impl RequestCode {
    /// Capabilities asked for by this request, in prompt order
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            RequestCode::Camera => &[Capability::Camera, Capability::Storage],
            RequestCode::Storage => &[Capability::Storage],
        }
    }
}

/// Outcome of a permission request.
///
/// `granted` is positional: entry `i` answers `code.capabilities()[i]`.
/// An empty vector means the user made no decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantResults {
    pub code: RequestCode,
    pub granted: Vec<bool>,
}

impl GrantResults {
    pub fn new(code: RequestCode, granted: Vec<bool>) -> Self {
        Self { code, granted }
    }

    pub fn no_decision(code: RequestCode) -> Self {
        Self {
            code,
            granted: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }

    /// True only if every requested capability has a positive answer.
    /// Missing positions count as denied.
    pub fn all_granted(&self) -> bool {
        let wanted = self.code.capabilities().len();
        self.granted.len() >= wanted && self.granted[..wanted].iter().all(|g| *g)
    }
}

/// Where a new image comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSource {
    Camera,
    Gallery,
}

impl ImageSource {
    /// Choices in the order they are presented
    pub const ALL: [ImageSource; 2] = [ImageSource::Camera, ImageSource::Gallery];

    pub fn label(&self) -> &'static str {
        match self {
            ImageSource::Camera => "CAMERA",
            ImageSource::Gallery => "GALLERY",
        }
    }
}

/// Metadata attached to a freshly allocated capture destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub title: String,
    pub description: String,
}

impl Default for ImageMetadata {
    fn default() -> Self {
        Self {
            title: "Sample Title".to_string(),
            description: "Sample Description".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Prepare,
    Recognize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionResult {
    Success(String),
    Failure { stage: FailureStage, reason: String },
}

impl RecognitionResult {
    /// User-facing message for a failed recognition
    pub fn failure_notice(stage: FailureStage, reason: &str) -> String {
        match stage {
            FailureStage::Prepare => format!("Failed to prepare image due to {reason}"),
            FailureStage::Recognize => format!("Failed to recognize text due to {reason}"),
        }
    }
}

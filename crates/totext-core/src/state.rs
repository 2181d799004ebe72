use totext_types::ImageReference;

/// Everything the screen shows, owned by the controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenState {
    pub selected_image: Option<ImageReference>,
    pub recognized_text: String,
    pub busy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ImageSelected,
    Recognizing,
}

impl ScreenState {
    pub fn phase(&self) -> Phase {
        match (&self.selected_image, self.busy) {
            (_, true) => Phase::Recognizing,
            (Some(_), false) => Phase::ImageSelected,
            (None, false) => Phase::Idle,
        }
    }
}

use std::cell::RefCell;
use std::time::Duration;

use slint::Timer;
use totext_types::ImageSource;

/// UI-thread state (separate from the controller's ScreenState)
pub struct UiState {
    /// Choices currently offered, index-aligned with the menu buttons
    pub choices: RefCell<Vec<ImageSource>>,
    pub notice_timer: Timer,
    pub notice_duration: Duration,
}

impl UiState {
    pub fn new(notice_ms: u64) -> Self {
        Self {
            choices: RefCell::new(Vec::new()),
            notice_timer: Timer::default(),
            notice_duration: Duration::from_millis(notice_ms),
        }
    }

    pub fn choice_at(&self, index: i32) -> Option<ImageSource> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.choices.borrow().get(i).copied())
    }
}

pub mod controller;
pub mod permission;
pub mod picker;
pub mod state;

pub use controller::{ScreenController, Services};
pub use permission::PermissionGate;
pub use picker::{ImageSourcePicker, PickOutcome};
pub use state::{Phase, ScreenState};

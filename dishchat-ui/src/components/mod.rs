//! UI Components
//!
//! The three panels of the page.

pub mod camera_panel;
pub mod chat_panel;
pub mod loading;
pub mod upload_panel;

pub use camera_panel::CameraPanel;
pub use chat_panel::ChatPanel;
pub use loading::InlineLoading;
pub use upload_panel::UploadPanel;

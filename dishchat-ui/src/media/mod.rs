//! Browser Media
//!
//! Camera capture over `getUserMedia` and a canvas, and object-URL previews.

pub mod blob;
pub mod camera;
pub mod preview;

pub use camera::BrowserCamera;
pub use preview::ObjectUrlPreviews;

//! User-facing status texts.

pub const SELECT_IMAGE_FIRST: &str = "Please select an image first.";
pub const UPLOADING: &str = "Uploading image and sending analyse request...";
pub const UPLOAD_FALLBACK: &str = "Failed to send image. Check backend host/port and CORS settings.";

pub const CAMERA_UNSUPPORTED: &str = "Camera is not available in this browser or device.";
pub const CAMERA_NO_SURFACE: &str = "Unable to access camera preview element.";
pub const CAMERA_PERMISSION: &str = "Unable to access camera. Please allow camera permission.";
pub const CAMERA_STARTED: &str = "Camera started. Click Capture Picture.";
pub const CAMERA_NOT_STARTED: &str = "Start camera first to capture a picture.";
pub const CAPTURE_FAILED: &str = "Could not capture image from camera.";
pub const CAPTURE_SELECTED: &str = "Picture captured and selected for upload.";

pub const CHAT_FALLBACK: &str = "Unable to reach /chat endpoint. Please check backend host, port, and CORS.";
pub const EMPTY_REPLY: &str = "No response message received from backend.";

//! Object-URL previews for captured images.

use dishchat::{CameraError, ImageFile, PreviewStore};
use web_sys::Url;

use super::blob::bytes_to_blob;

#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectUrlPreviews;

impl PreviewStore for ObjectUrlPreviews {
    fn create(&self, image: &ImageFile) -> Result<String, CameraError> {
        let blob = bytes_to_blob(&image.bytes, &image.content_type)
            .map_err(|e| CameraError::Preview(format!("{:?}", e)))?;
        Url::create_object_url_with_blob(&blob).map_err(|e| CameraError::Preview(format!("{:?}", e)))
    }

    fn revoke(&self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            web_sys::console::warn_1(&format!("revokeObjectURL failed: {:?}", e).into());
        }
    }
}

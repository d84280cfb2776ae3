//! Capture Preview
//!
//! A captured frame is shown through a revocable URL (an object URL in the
//! browser). [`PreviewSlot`] keeps at most one of them alive.

use std::cell::RefCell;

use crate::error::CameraError;
use crate::image::ImageFile;

/// Creates and revokes preview URLs for in-memory images
pub trait PreviewStore {
    fn create(&self, image: &ImageFile) -> Result<String, CameraError>;

    fn revoke(&self, url: &str);
}

/// Holder of the one live preview URL
pub struct PreviewSlot<P: PreviewStore> {
    store: P,
    current: RefCell<Option<String>>,
}

impl<P: PreviewStore> PreviewSlot<P> {
    pub fn new(store: P) -> Self {
        Self {
            store,
            current: RefCell::new(None),
        }
    }

    /// Revoke the current URL (if any) and create one for `image`.
    pub fn replace(&self, image: &ImageFile) -> Result<String, CameraError> {
        self.clear();
        let url = self.store.create(image)?;
        tracing::debug!(%url, "preview created");
        *self.current.borrow_mut() = Some(url.clone());
        Ok(url)
    }

    /// Revoke the current URL. No-op when empty.
    pub fn clear(&self) {
        let url = self.current.borrow_mut().take();
        if let Some(url) = url {
            self.store.revoke(&url);
            tracing::debug!(%url, "preview revoked");
        }
    }

    pub fn current(&self) -> Option<String> {
        self.current.borrow().clone()
    }

    pub fn store(&self) -> &P {
        &self.store
    }
}

/// Preview store for targets that never display previews
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPreview;

impl PreviewStore for NoPreview {
    fn create(&self, _image: &ImageFile) -> Result<String, CameraError> {
        Err(CameraError::Preview("previews are not supported here".to_string()))
    }

    fn revoke(&self, _url: &str) {}
}

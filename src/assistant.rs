//! Recipe Assistant Controller
//!
//! Drives the three user flows (upload & analyse, camera capture, chat)
//! and publishes every visible change through a [`Store<ViewState>`].
//!
//! All methods take `&self` so a frontend can run an upload, a chat
//! request and a camera start at the same time; none of them holds a
//! borrow across an `.await`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::api::RecipeBackend;
use crate::camera::{Camera, CaptureSettings, MediaCapture};
use crate::chat::{normalize_reply, ChatMessage};
use crate::error::CameraError;
use crate::image::ImageFile;
use crate::preview::{PreviewSlot, PreviewStore};
use crate::state::{Store, ViewState, NO_IMAGE_SELECTED};
use crate::status;

/// How a user action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to do (no input, or overtaken by a later action)
    Skipped,
    Succeeded,
    Failed,
}

pub struct RecipeAssistant<B, M, P>
where
    B: RecipeBackend,
    M: MediaCapture,
    P: PreviewStore,
{
    backend: B,
    camera: Camera<M>,
    preview: PreviewSlot<P>,
    selected: RefCell<Option<Rc<ImageFile>>>,
    state: Store<ViewState>,
    torn_down: Cell<bool>,
}

impl<B, M, P> RecipeAssistant<B, M, P>
where
    B: RecipeBackend,
    M: MediaCapture,
    P: PreviewStore,
{
    pub fn new(backend: B, media: M, previews: P, capture: CaptureSettings) -> Self {
        let camera_supported = media.is_supported();
        Self {
            backend,
            camera: Camera::new(media, capture),
            preview: PreviewSlot::new(previews),
            selected: RefCell::new(None),
            state: Store::new(ViewState::new(camera_supported)),
            torn_down: Cell::new(false),
        }
    }

    pub fn state(&self) -> &Store<ViewState> {
        &self.state
    }

    pub fn camera(&self) -> &Camera<M> {
        &self.camera
    }

    pub fn preview(&self) -> &PreviewSlot<P> {
        &self.preview
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn selected_image(&self) -> Option<Rc<ImageFile>> {
        self.selected.borrow().clone()
    }

    // ============ Upload ============

    /// Replace the selected image (or clear it with `None`).
    pub fn select_image(&self, image: Option<ImageFile>) {
        let name = image
            .as_ref()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| NO_IMAGE_SELECTED.to_string());
        *self.selected.borrow_mut() = image.map(Rc::new);
        self.state.update(|s| s.selected_image_name = name);
    }

    /// Upload the selected image and show the backend's answer.
    pub async fn analyse(&self) -> Outcome {
        let Some(image) = self.selected_image() else {
            self.state
                .update(|s| s.analyse_status = status::SELECT_IMAGE_FIRST.to_string());
            return Outcome::Skipped;
        };

        self.state.update(|s| {
            s.uploading = true;
            s.analyse_status = status::UPLOADING.to_string();
        });
        tracing::info!(image = %image.name, bytes = image.len(), "analysing image");

        match self.backend.upload_image(&image).await {
            Ok(message) => {
                self.state.update(|s| {
                    s.analyse_status = message;
                    s.uploading = false;
                });
                Outcome::Succeeded
            }
            Err(e) => {
                tracing::warn!(error = %e, "image upload failed");
                let message = e.user_message(status::UPLOAD_FALLBACK);
                self.state.update(|s| {
                    s.analyse_status = message;
                    s.uploading = false;
                });
                Outcome::Failed
            }
        }
    }

    // ============ Camera ============

    pub async fn start_camera(&self) -> Outcome {
        if !self.camera.is_supported() {
            self.set_camera_status(status::CAMERA_UNSUPPORTED);
            return Outcome::Failed;
        }

        if self.state.with(|s| s.camera_active) {
            self.state.update(|s| s.camera_active = false);
        }

        match self.camera.start().await {
            Ok(()) => {
                self.set_camera_status(status::CAMERA_STARTED);
                Outcome::Succeeded
            }
            Err(CameraError::Superseded) => Outcome::Skipped,
            Err(e) => {
                tracing::warn!(error = %e, "camera start failed");
                let message = match e {
                    CameraError::Unsupported => status::CAMERA_UNSUPPORTED,
                    CameraError::NoSurface => status::CAMERA_NO_SURFACE,
                    _ => status::CAMERA_PERMISSION,
                };
                self.set_camera_status(message);
                Outcome::Failed
            }
        }
    }

    /// Take a picture, select it for upload and show its preview.
    pub async fn capture(&self) -> Outcome {
        if !self.camera.is_active() {
            self.set_camera_status(status::CAMERA_NOT_STARTED);
            return Outcome::Failed;
        }

        let frame = match self.camera.capture().await {
            Ok(frame) => frame,
            Err(CameraError::NotActive) => {
                self.set_camera_status(status::CAMERA_NOT_STARTED);
                return Outcome::Failed;
            }
            Err(CameraError::Superseded) => return Outcome::Skipped,
            Err(e) => {
                tracing::warn!(error = %e, "capture failed");
                self.set_camera_status(status::CAPTURE_FAILED);
                return Outcome::Failed;
            }
        };

        let image = ImageFile::captured(frame, chrono::Utc::now().timestamp_millis());
        let preview_url = match self.preview.replace(&image) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(error = %e, "no preview for captured image");
                None
            }
        };
        let name = image.name.clone();
        *self.selected.borrow_mut() = Some(Rc::new(image));

        let camera_active = self.camera.is_active();
        self.state.update(|s| {
            s.selected_image_name = name;
            s.preview_url = preview_url;
            s.camera_status = status::CAPTURE_SELECTED.to_string();
            s.camera_active = camera_active;
        });
        Outcome::Succeeded
    }

    /// Drop the current picture and go back to the live camera.
    pub async fn recapture(&self) -> Outcome {
        self.select_image(None);
        self.clear_preview();
        self.start_camera().await
    }

    pub fn stop_camera(&self) {
        self.camera.stop();
        if self.state.with(|s| s.camera_active) {
            self.state.update(|s| s.camera_active = false);
        }
    }

    fn set_camera_status(&self, message: &str) {
        let camera_active = self.camera.is_active();
        self.state.update(|s| {
            s.camera_status = message.to_string();
            s.camera_active = camera_active;
        });
    }

    fn clear_preview(&self) {
        self.preview.clear();
        if self.state.with(|s| s.preview_url.is_some()) {
            self.state.update(|s| s.preview_url = None);
        }
    }

    // ============ Chat ============

    pub fn set_chat_input(&self, input: impl Into<String>) {
        let input = input.into();
        self.state.update(|s| s.chat_input = input);
    }

    /// Send whatever is in the chat input.
    pub async fn send_message(&self) -> Outcome {
        let message = self.state.with(|s| s.chat_input.trim().to_string());
        if message.is_empty() {
            return Outcome::Skipped;
        }

        self.state.update(|s| {
            s.push_message(ChatMessage::user(message.clone()));
            s.chat_input.clear();
            s.chat_loading = true;
        });
        tracing::debug!(chars = message.len(), "sending chat message");

        match self.backend.chat(&message).await {
            Ok(reply) => {
                let reply = if reply.is_empty() {
                    status::EMPTY_REPLY.to_string()
                } else {
                    reply
                };
                let content = normalize_reply(&reply);
                self.state.update(|s| {
                    s.push_message(ChatMessage::assistant(content));
                    s.chat_loading = false;
                });
                Outcome::Succeeded
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat request failed");
                let content = e.user_message(status::CHAT_FALLBACK);
                self.state.update(|s| {
                    s.push_message(ChatMessage::assistant(content));
                    s.chat_loading = false;
                });
                Outcome::Failed
            }
        }
    }

    /// Set the input and send it in one step.
    pub async fn send(&self, message: impl Into<String>) -> Outcome {
        self.set_chat_input(message);
        self.send_message().await
    }

    // ============ Teardown ============

    /// Stop the camera and revoke the preview. Safe to call repeatedly.
    pub fn teardown(&self) {
        self.release_resources();
        self.state.update(|s| {
            s.camera_active = false;
            s.preview_url = None;
        });
    }

    fn release_resources(&self) {
        if !self.torn_down.replace(true) {
            tracing::debug!("releasing camera and preview");
        }
        self.camera.stop();
        self.preview.clear();
    }
}

impl<B, M, P> Drop for RecipeAssistant<B, M, P>
where
    B: RecipeBackend,
    M: MediaCapture,
    P: PreviewStore,
{
    fn drop(&mut self) {
        // Observers may already be gone; release without notifying
        self.release_resources();
    }
}

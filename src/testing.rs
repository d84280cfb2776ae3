//! In-memory doubles of the platform seams, for unit tests.

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use tokio::sync::Notify;

use crate::api::RecipeBackend;
use crate::camera::{CaptureSettings, FacingMode, MediaCapture};
use crate::error::{CameraError, ClientError};
use crate::image::ImageFile;
use crate::preview::PreviewStore;

/// Backend that answers from queues and records what it was sent
#[derive(Default)]
pub struct FakeBackend {
    upload_replies: RefCell<VecDeque<Result<String, ClientError>>>,
    chat_replies: RefCell<VecDeque<Result<String, ClientError>>>,
    uploads: RefCell<Vec<String>>,
    chats: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_upload(self, reply: Result<String, ClientError>) -> Self {
        self.upload_replies.borrow_mut().push_back(reply);
        self
    }

    pub fn reply_chat(self, reply: Result<String, ClientError>) -> Self {
        self.chat_replies.borrow_mut().push_back(reply);
        self
    }

    /// Names of the uploaded images, in order
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.borrow().clone()
    }

    pub fn chats(&self) -> Vec<String> {
        self.chats.borrow().clone()
    }
}

#[async_trait(?Send)]
impl RecipeBackend for FakeBackend {
    async fn upload_image(&self, image: &ImageFile) -> Result<String, ClientError> {
        self.uploads.borrow_mut().push(image.name.clone());
        let reply = self.upload_replies.borrow_mut().pop_front();
        reply.unwrap_or_else(|| Ok("analysed".to_string()))
    }

    async fn chat(&self, message: &str) -> Result<String, ClientError> {
        self.chats.borrow_mut().push(message.to_string());
        let reply = self.chat_replies.borrow_mut().pop_front();
        reply.unwrap_or_else(|| Ok("reply".to_string()))
    }
}

/// Camera whose streams are numbered and tracked until released
pub struct FakeCamera {
    supported: bool,
    next_stream: Cell<u32>,
    live: RefCell<Vec<u32>>,
    released: Cell<usize>,
    detached: Cell<usize>,
    facing: RefCell<Vec<FacingMode>>,
    fail_acquire: Cell<bool>,
    fail_attach: RefCell<Option<CameraError>>,
    fail_capture: RefCell<Option<CameraError>>,
    gate: RefCell<Option<Rc<Notify>>>,
    capture_gate: RefCell<Option<Rc<Notify>>>,
}

impl FakeCamera {
    pub fn new() -> Self {
        Self {
            supported: true,
            next_stream: Cell::new(0),
            live: RefCell::new(Vec::new()),
            released: Cell::new(0),
            detached: Cell::new(0),
            facing: RefCell::new(Vec::new()),
            fail_acquire: Cell::new(false),
            fail_attach: RefCell::new(None),
            fail_capture: RefCell::new(None),
            gate: RefCell::new(None),
            capture_gate: RefCell::new(None),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    pub fn fail_acquire(&self, fail: bool) {
        self.fail_acquire.set(fail);
    }

    pub fn fail_attach(&self, error: Option<CameraError>) {
        *self.fail_attach.borrow_mut() = error;
    }

    pub fn fail_capture(&self, error: Option<CameraError>) {
        *self.fail_capture.borrow_mut() = error;
    }

    /// Make the next acquisition wait until the returned gate is notified.
    pub fn gate_acquire(&self) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        *self.gate.borrow_mut() = Some(Rc::clone(&gate));
        gate
    }

    /// Make the next frame capture wait until the returned gate is notified.
    pub fn gate_capture(&self) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        *self.capture_gate.borrow_mut() = Some(Rc::clone(&gate));
        gate
    }

    pub fn acquired(&self) -> u32 {
        self.next_stream.get()
    }

    pub fn live_streams(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn released(&self) -> usize {
        self.released.get()
    }

    pub fn detached(&self) -> usize {
        self.detached.get()
    }

    pub fn requested_facing(&self) -> Vec<FacingMode> {
        self.facing.borrow().clone()
    }
}

#[async_trait(?Send)]
impl MediaCapture for FakeCamera {
    type Stream = u32;

    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn acquire_stream(&self, facing: FacingMode) -> Result<u32, CameraError> {
        self.facing.borrow_mut().push(facing);

        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.fail_acquire.get() {
            return Err(CameraError::Acquire("NotAllowedError".to_string()));
        }

        let id = self.next_stream.get();
        self.next_stream.set(id + 1);
        self.live.borrow_mut().push(id);
        Ok(id)
    }

    async fn attach(&self, _stream: &u32) -> Result<(), CameraError> {
        match self.fail_attach.borrow().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn capture_frame(&self, stream: &u32, _settings: &CaptureSettings) -> Result<Vec<u8>, CameraError> {
        let gate = self.capture_gate.borrow_mut().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if let Some(e) = self.fail_capture.borrow().clone() {
            return Err(e);
        }
        Ok(vec![0xff, 0xd8, *stream as u8])
    }

    fn release(&self, stream: u32) {
        self.live.borrow_mut().retain(|id| *id != stream);
        self.released.set(self.released.get() + 1);
    }

    fn detach(&self) {
        self.detached.set(self.detached.get() + 1);
    }
}

/// Preview store handing out `blob:fake/<n>` URLs
#[derive(Default)]
pub struct FakePreviews {
    next: Cell<u32>,
    live: RefCell<Vec<String>>,
    revoked: Cell<usize>,
}

impl FakePreviews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> Vec<String> {
        self.live.borrow().clone()
    }

    pub fn revoked(&self) -> usize {
        self.revoked.get()
    }
}

impl PreviewStore for FakePreviews {
    fn create(&self, _image: &ImageFile) -> Result<String, CameraError> {
        let n = self.next.get();
        self.next.set(n + 1);
        let url = format!("blob:fake/{}", n);
        self.live.borrow_mut().push(url.clone());
        Ok(url)
    }

    fn revoke(&self, url: &str) {
        self.live.borrow_mut().retain(|live| live != url);
        self.revoked.set(self.revoked.get() + 1);
    }
}

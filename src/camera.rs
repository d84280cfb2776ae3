//! Camera Lifecycle
//!
//! Platform-neutral state machine over a [`MediaCapture`] capability.
//!
//! ## States
//!
//! `Idle → Starting → Active → Idle`. A start that fails, a stop, and a
//! successful capture all return to `Idle`.
//!
//! ## Resources
//!
//! At most one stream is held at a time. Every start stops the previous
//! stream first, and a start that is overtaken by a stop or another start
//! while it awaits the platform releases its late stream on arrival.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};

use crate::error::CameraError;

/// Which camera to ask the platform for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Rear camera
    #[default]
    Environment,
    /// Front camera
    User,
}

impl FacingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacingMode::Environment => "environment",
            FacingMode::User => "user",
        }
    }
}

/// Pixel dimensions of a captured frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

/// How frames are requested and encoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureSettings {
    #[serde(default)]
    pub facing_mode: FacingMode,

    #[serde(default = "default_fallback_width")]
    pub fallback_width: u32,

    #[serde(default = "default_fallback_height")]
    pub fallback_height: u32,

    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: f64,
}

fn default_fallback_width() -> u32 {
    1280
}

fn default_fallback_height() -> u32 {
    720
}

fn default_jpeg_quality() -> f64 {
    0.92
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            facing_mode: FacingMode::default(),
            fallback_width: default_fallback_width(),
            fallback_height: default_fallback_height(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl CaptureSettings {
    /// Canvas size for a video whose native size may not be known yet (0).
    pub fn frame_size(&self, video_width: u32, video_height: u32) -> FrameSize {
        FrameSize {
            width: if video_width > 0 { video_width } else { self.fallback_width },
            height: if video_height > 0 { video_height } else { self.fallback_height },
        }
    }
}

/// Platform camera access.
///
/// Browser builds implement this over `getUserMedia` and a canvas; the
/// native build has no camera at all.
#[async_trait(?Send)]
pub trait MediaCapture {
    /// Handle to a live stream. Cloning must not duplicate the stream.
    type Stream: Clone;

    /// Whether the device/browser can provide a camera at all
    fn is_supported(&self) -> bool;

    /// Ask the platform for a video stream
    async fn acquire_stream(&self, facing: FacingMode) -> Result<Self::Stream, CameraError>;

    /// Bind the stream to the preview surface and start playback
    async fn attach(&self, stream: &Self::Stream) -> Result<(), CameraError>;

    /// Snapshot the current frame as an encoded JPEG
    async fn capture_frame(
        &self,
        stream: &Self::Stream,
        settings: &CaptureSettings,
    ) -> Result<Vec<u8>, CameraError>;

    /// Stop every track of the stream
    fn release(&self, stream: Self::Stream);

    /// Unbind whatever the preview surface shows
    fn detach(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    Idle,
    Starting,
    Active,
}

/// Owns the single camera stream of the page
pub struct Camera<M: MediaCapture> {
    media: M,
    settings: CaptureSettings,
    state: Cell<CameraState>,
    stream: RefCell<Option<M::Stream>>,
    // Bumped by every start and stop; a pending start compares against it
    generation: Cell<u64>,
}

impl<M: MediaCapture> Camera<M> {
    pub fn new(media: M, settings: CaptureSettings) -> Self {
        Self {
            media,
            settings,
            state: Cell::new(CameraState::Idle),
            stream: RefCell::new(None),
            generation: Cell::new(0),
        }
    }

    pub fn state(&self) -> CameraState {
        self.state.get()
    }

    pub fn is_active(&self) -> bool {
        self.state.get() == CameraState::Active
    }

    pub fn is_supported(&self) -> bool {
        self.media.is_supported()
    }

    pub fn has_stream(&self) -> bool {
        self.stream.borrow().is_some()
    }

    pub fn settings(&self) -> &CaptureSettings {
        &self.settings
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    /// Acquire a stream and start the preview.
    ///
    /// Returns [`CameraError::Superseded`] when a stop or another start
    /// happened while this one was waiting on the platform.
    pub async fn start(&self) -> Result<(), CameraError> {
        if !self.media.is_supported() {
            return Err(CameraError::Unsupported);
        }

        self.stop();
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.state.set(CameraState::Starting);
        tracing::debug!(generation, "camera starting");

        let stream = match self.media.acquire_stream(self.settings.facing_mode).await {
            Ok(stream) => stream,
            Err(e) => {
                if self.generation.get() != generation {
                    return Err(CameraError::Superseded);
                }
                self.stop();
                return Err(e);
            }
        };

        if self.generation.get() != generation {
            tracing::debug!(generation, "camera start superseded, releasing late stream");
            self.media.release(stream);
            return Err(CameraError::Superseded);
        }

        *self.stream.borrow_mut() = Some(stream.clone());

        if let Err(e) = self.media.attach(&stream).await {
            if self.generation.get() != generation {
                return Err(CameraError::Superseded);
            }
            tracing::warn!(error = %e, "camera preview failed");
            self.stop();
            return Err(e);
        }

        // A stop during attach already released the stream
        if self.generation.get() != generation {
            return Err(CameraError::Superseded);
        }

        self.state.set(CameraState::Active);
        tracing::info!("camera active");
        Ok(())
    }

    /// Grab one JPEG frame, then stop the camera.
    ///
    /// On failure the camera keeps running. Returns
    /// [`CameraError::Superseded`] without touching the camera when it was
    /// stopped or restarted while the frame was being encoded.
    pub async fn capture(&self) -> Result<Vec<u8>, CameraError> {
        let stream = match (self.state.get(), self.stream.borrow().clone()) {
            (CameraState::Active, Some(stream)) => stream,
            _ => return Err(CameraError::NotActive),
        };
        let generation = self.generation.get();

        let frame = self.media.capture_frame(&stream, &self.settings).await;
        if self.generation.get() != generation {
            tracing::debug!(generation, "capture superseded, keeping current session");
            return Err(CameraError::Superseded);
        }

        let frame = frame?;
        if frame.is_empty() {
            return Err(CameraError::EmptyBlob);
        }

        tracing::info!(bytes = frame.len(), "frame captured");
        self.stop();
        Ok(frame)
    }

    /// Release the stream and return to idle. Safe to call at any time.
    pub fn stop(&self) {
        self.generation.set(self.generation.get() + 1);

        let stream = self.stream.borrow_mut().take();
        if let Some(stream) = stream {
            self.media.release(stream);
            tracing::debug!("camera stream released");
        }

        self.media.detach();
        self.state.set(CameraState::Idle);
    }
}

/// Stand-in for targets without a camera
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCamera;

#[async_trait(?Send)]
impl MediaCapture for NoCamera {
    type Stream = ();

    fn is_supported(&self) -> bool {
        false
    }

    async fn acquire_stream(&self, _facing: FacingMode) -> Result<(), CameraError> {
        Err(CameraError::Unsupported)
    }

    async fn attach(&self, _stream: &()) -> Result<(), CameraError> {
        Err(CameraError::Unsupported)
    }

    async fn capture_frame(&self, _stream: &(), _settings: &CaptureSettings) -> Result<Vec<u8>, CameraError> {
        Err(CameraError::Unsupported)
    }

    fn release(&self, _stream: ()) {}

    fn detach(&self) {}
}

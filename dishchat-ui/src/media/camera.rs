//! Browser Camera
//!
//! `MediaCapture` over `navigator.mediaDevices.getUserMedia`, rendering into
//! the page's `<video>` element and snapshotting frames through an offscreen
//! canvas.

use async_trait::async_trait;
use leptos::html::Video;
use leptos::NodeRef;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use dishchat::{CameraError, CaptureSettings, FacingMode, MediaCapture};

use super::blob::blob_to_bytes;

/// Camera bound to a `<video>` element of the page
pub struct BrowserCamera {
    video: NodeRef<Video>,
}

impl BrowserCamera {
    pub fn new(video: NodeRef<Video>) -> Self {
        Self { video }
    }
}

fn describe(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

/// `{ facingMode: "<mode>" }`
fn video_constraints(facing: FacingMode) -> Result<js_sys::Object, JsValue> {
    let video = js_sys::Object::new();
    js_sys::Reflect::set(&video, &"facingMode".into(), &facing.as_str().into())?;
    Ok(video)
}

/// Resolve `canvas.toBlob` into an optional blob.
async fn canvas_to_blob(canvas: &HtmlCanvasElement, mime: &str, quality: f64) -> Result<Option<web_sys::Blob>, JsValue> {
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let callback = Closure::once_into_js(move |blob: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &blob);
        });
        if let Err(e) = canvas.to_blob_with_type_and_encoder_options(callback.unchecked_ref(), mime, &JsValue::from_f64(quality)) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });

    let result = JsFuture::from(promise).await?;
    Ok(result.dyn_into::<web_sys::Blob>().ok())
}

#[async_trait(?Send)]
impl MediaCapture for BrowserCamera {
    type Stream = MediaStream;

    fn is_supported(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let navigator: JsValue = window.navigator().into();

        js_sys::Reflect::get(&navigator, &"mediaDevices".into())
            .ok()
            .filter(|devices| !devices.is_undefined() && !devices.is_null())
            .and_then(|devices| js_sys::Reflect::get(&devices, &"getUserMedia".into()).ok())
            .map(|get_user_media| get_user_media.is_function())
            .unwrap_or(false)
    }

    async fn acquire_stream(&self, facing: FacingMode) -> Result<MediaStream, CameraError> {
        let window = web_sys::window().ok_or(CameraError::Unsupported)?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| CameraError::Acquire(describe(&e)))?;

        let constraints = MediaStreamConstraints::new();
        let video = video_constraints(facing).map_err(|e| CameraError::Acquire(describe(&e)))?;
        constraints.set_video(&video);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| CameraError::Acquire(describe(&e)))?;
        let stream = JsFuture::from(promise)
            .await
            .map_err(|e| CameraError::Acquire(describe(&e)))?;

        stream
            .dyn_into::<MediaStream>()
            .map_err(|e| CameraError::Acquire(describe(&e)))
    }

    async fn attach(&self, stream: &MediaStream) -> Result<(), CameraError> {
        let video = self.video.get_untracked().ok_or(CameraError::NoSurface)?;
        video.set_src_object(Some(stream));

        let playing = video.play().map_err(|e| CameraError::Playback(describe(&e)))?;
        JsFuture::from(playing)
            .await
            .map_err(|e| CameraError::Playback(describe(&e)))?;
        Ok(())
    }

    async fn capture_frame(&self, _stream: &MediaStream, settings: &CaptureSettings) -> Result<Vec<u8>, CameraError> {
        let video = self.video.get_untracked().ok_or(CameraError::NoSurface)?;
        let size = settings.frame_size(video.video_width(), video.video_height());

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(CameraError::NoContext)?;
        let canvas = document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or(CameraError::NoContext)?;
        canvas.set_width(size.width);
        canvas.set_height(size.height);

        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(CameraError::NoContext)?;
        context
            .draw_image_with_html_video_element_and_dw_and_dh(&video, 0.0, 0.0, size.width as f64, size.height as f64)
            .map_err(|_| CameraError::NoContext)?;

        let blob = canvas_to_blob(&canvas, dishchat::image::JPEG_CONTENT_TYPE, settings.jpeg_quality)
            .await
            .map_err(|_| CameraError::EmptyBlob)?
            .ok_or(CameraError::EmptyBlob)?;

        blob_to_bytes(&blob).await.map_err(|_| CameraError::EmptyBlob)
    }

    fn release(&self, stream: MediaStream) {
        for track in stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }

    fn detach(&self) {
        if let Some(video) = self.video.get_untracked() {
            video.set_src_object(None);
        }
    }
}

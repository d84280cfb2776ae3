//! Recipe Backend API
//!
//! The two calls the client makes, behind a trait so the browser (gloo-net)
//! and native (reqwest) builds share the same flows.
//!
//! - `POST {base}/upload-image`: multipart, field `image`
//! - `POST {base}/chat`: JSON `{ "message": ... }`
//!
//! Both answer `{ "message": ... }`.

#[cfg(feature = "native")]
mod http;

#[cfg(feature = "native")]
pub use http::HttpBackend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::image::ImageFile;

/// Multipart field the backend reads the image from
pub const IMAGE_FIELD: &str = "image";

/// The recipe analysis and chat service
#[async_trait(?Send)]
pub trait RecipeBackend {
    /// Send an image for analysis; returns the server's message.
    async fn upload_image(&self, image: &ImageFile) -> Result<String, ClientError>;

    /// Send a chat message; returns the assistant reply as sent by the server.
    async fn chat(&self, message: &str) -> Result<String, ClientError>;
}

/// Endpoint URLs derived from a base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub upload_image: String,
    pub chat: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            upload_image: format!("{}/upload-image", base),
            chat: format!("{}/chat", base),
        }
    }
}

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

/// Success body of both endpoints
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

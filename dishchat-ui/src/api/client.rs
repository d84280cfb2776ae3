//! HTTP API Client
//!
//! Talks to the recipe backend with gloo-net. The base URL is fixed at
//! build time; users cannot change it from the page.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};

use dishchat::api::IMAGE_FIELD;
use dishchat::{BackendConfig, ChatRequest, ClientError, Endpoints, ErrorBody, ImageFile, MessageResponse, RecipeBackend};

use crate::media::blob::bytes_to_blob;

/// Backend base URL: `DISHCHAT_BACKEND_URL` at build time, else the
/// default `http://localhost:80`.
pub fn backend_base_url() -> String {
    match option_env!("DISHCHAT_BACKEND_URL") {
        Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
        _ => BackendConfig::default().base_url(),
    }
}

/// Recipe backend over `fetch`
pub struct GlooBackend {
    endpoints: Endpoints,
}

impl GlooBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoints: Endpoints::new(base_url),
        }
    }

    async fn read_message(response: Response) -> Result<String, ClientError> {
        if !response.ok() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Http {
                status: response.status(),
                body: ErrorBody::from_text(text),
            });
        }

        let body: MessageResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(body.message)
    }
}

#[async_trait(?Send)]
impl RecipeBackend for GlooBackend {
    async fn upload_image(&self, image: &ImageFile) -> Result<String, ClientError> {
        let blob = bytes_to_blob(&image.bytes, &image.content_type)
            .map_err(|e| ClientError::Request(format!("{:?}", e)))?;
        let form = web_sys::FormData::new()
            .map_err(|e| ClientError::Request(format!("{:?}", e)))?;
        form.append_with_blob_and_filename(IMAGE_FIELD, &blob, &image.name)
            .map_err(|e| ClientError::Request(format!("{:?}", e)))?;

        log::debug!("POST {} ({} bytes)", self.endpoints.upload_image, image.len());

        let response = Request::post(&self.endpoints.upload_image)
            .body(form)
            .map_err(|e| ClientError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Self::read_message(response).await
    }

    async fn chat(&self, message: &str) -> Result<String, ClientError> {
        let response = Request::post(&self.endpoints.chat)
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .map_err(|e| ClientError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Self::read_message(response).await
    }
}

//! reqwest-backed [`RecipeBackend`] for native builds.

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use std::time::Duration;

use super::{ChatRequest, Endpoints, MessageResponse, RecipeBackend, IMAGE_FIELD};
use crate::config::BackendConfig;
use crate::error::{ClientError, ErrorBody};
use crate::image::ImageFile;

/// Recipe backend over HTTP
pub struct HttpBackend {
    client: Client,
    endpoints: Endpoints,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Request(e.to_string()))?;

        Ok(Self {
            client,
            endpoints: Endpoints::new(&config.base_url()),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn read_message(response: Response) -> Result<String, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Http {
                status: status.as_u16(),
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

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Network(format!("request timed out: {}", e))
    } else if e.is_builder() {
        ClientError::Request(e.to_string())
    } else {
        ClientError::Network(e.to_string())
    }
}

#[async_trait(?Send)]
impl RecipeBackend for HttpBackend {
    async fn upload_image(&self, image: &ImageFile) -> Result<String, ClientError> {
        let part = multipart::Part::bytes(image.bytes.clone())
            .file_name(image.name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| ClientError::Request(e.to_string()))?;
        let form = multipart::Form::new().part(IMAGE_FIELD, part);

        tracing::debug!(url = %self.endpoints.upload_image, image = ?image, "POST upload-image");

        let response = self
            .client
            .post(&self.endpoints.upload_image)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        Self::read_message(response).await
    }

    async fn chat(&self, message: &str) -> Result<String, ClientError> {
        tracing::debug!(url = %self.endpoints.chat, chars = message.len(), "POST chat");

        let response = self
            .client
            .post(&self.endpoints.chat)
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(transport_error)?;

        Self::read_message(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_follow_config() {
        let config = BackendConfig {
            port: 8080,
            ..BackendConfig::default()
        };
        let backend = HttpBackend::new(&config).unwrap();
        assert_eq!(backend.endpoints().chat, "http://localhost:8080/chat");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Grab a free port, then close it again
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let config = BackendConfig {
            hostname: "127.0.0.1".to_string(),
            port,
            request_timeout_secs: Some(5),
            ..BackendConfig::default()
        };
        let backend = HttpBackend::new(&config).unwrap();

        let err = backend.chat("hello").await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)), "{:?}", err);
    }
}

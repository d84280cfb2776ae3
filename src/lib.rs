//! # Dishchat
//!
//! Client core for a recipe assistant: photograph or upload a dish, have the
//! backend identify it, then chat about the recipe.
//!
//! ## Modules
//!
//! - [`assistant`]: the controller tying the flows together
//! - [`state`]: observable view state
//! - [`camera`]: camera lifecycle over a platform [`MediaCapture`]
//! - [`preview`]: single live preview URL
//! - [`api`]: backend trait, wire types and (native) HTTP client
//! - [`chat`]: transcript and reply normalization
//! - [`error`]: error types and user-facing error messages
//!
//! The browser frontend lives in the `dishchat-ui` crate and supplies its own
//! [`RecipeBackend`], [`MediaCapture`] and [`PreviewStore`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dishchat::{Config, HttpBackend, ImageFile, NoCamera, NoPreview, RecipeAssistant};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let backend = HttpBackend::new(&config.backend)?;
//!     let app = RecipeAssistant::new(backend, NoCamera, NoPreview, config.camera);
//!
//!     app.select_image(Some(ImageFile::from_path(std::path::Path::new("dinner.jpg"))?));
//!     app.analyse().await;
//!     println!("{}", app.state().borrow().analyse_status);
//!
//!     app.send("How do I make this?").await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod assistant;
pub mod camera;
pub mod chat;
pub mod config;
pub mod error;
pub mod image;
pub mod preview;
pub mod state;
pub mod status;

#[cfg(test)]
mod testing;

pub use api::{ChatRequest, Endpoints, MessageResponse, RecipeBackend};
#[cfg(feature = "native")]
pub use api::HttpBackend;

pub use assistant::{Outcome, RecipeAssistant};

pub use camera::{Camera, CameraState, CaptureSettings, FacingMode, FrameSize, MediaCapture, NoCamera};

pub use chat::{normalize_reply, sanitize_html, ChatMessage, ChatRole, Transcript};

pub use config::{BackendConfig, Config, LoggingConfig};
#[cfg(feature = "native")]
pub use config::ConfigError;

pub use error::{CameraError, ClientError, ErrorBody};

pub use image::ImageFile;

pub use preview::{NoPreview, PreviewSlot, PreviewStore};

pub use state::{Store, SubscriptionId, ViewState};

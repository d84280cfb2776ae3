//! Backend Access
//!
//! gloo-net implementation of the core's `RecipeBackend`.

pub mod client;

pub use client::{backend_base_url, GlooBackend};

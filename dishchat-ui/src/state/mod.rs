//! State Management
//!
//! Bridges the core's observable view state into Leptos signals.

pub mod context;

pub use context::{provide_app_context, use_app_context, AppContext, BrowserAssistant};

//! Dishchat Frontend
//!
//! Recipe assistant page built with Leptos (WASM).
//!
//! # Features
//!
//! - Upload a dish photo, or take one with the device camera
//! - Send it to the backend for analysis
//! - Chat about the recipe
//!
//! # Architecture
//!
//! The flows and their state live in the `dishchat` core crate. This crate
//! supplies the browser side of its seams (gloo-net backend, `getUserMedia`
//! camera, object-URL previews) and renders the core's view state.

use leptos::*;

mod api;
mod app;
mod components;
mod media;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Core crate logs through `tracing`, which falls back to `log` here
    let _ = console_log::init_with_level(log::Level::Debug);

    mount_to_body(|| view! { <app::App /> });
}

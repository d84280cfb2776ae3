//! App Root Component

use leptos::*;

use dishchat::state::TITLE;

use crate::components::{CameraPanel, ChatPanel, UploadPanel};
use crate::state::provide_app_context;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let ctx = provide_app_context();
    let title = move || ctx.view.with(|s| s.title.clone());

    view! {
        <div class="min-h-screen bg-gray-900 text-white">
            <header class="bg-gray-800 border-b border-gray-700">
                <div class="container mx-auto px-4 py-4 flex items-center space-x-2">
                    <span class="text-2xl">"🍲"</span>
                    <h1 class="text-xl font-bold">{title}</h1>
                </div>
            </header>

            <main class="container mx-auto px-4 py-8 grid gap-6 lg:grid-cols-2">
                <div class="space-y-6">
                    <UploadPanel />
                    <CameraPanel />
                </div>
                <ChatPanel />
            </main>
        </div>
    }
}


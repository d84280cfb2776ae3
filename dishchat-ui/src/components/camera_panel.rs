//! Camera Panel
//!
//! Live camera view, capture controls and the captured-photo preview.

use leptos::*;

use crate::state::use_app_context;

#[component]
pub fn CameraPanel() -> impl IntoView {
    let ctx = use_app_context();
    let view_state = ctx.view;

    let supported = move || view_state.with(|s| s.camera_supported);
    let active = move || view_state.with(|s| s.camera_active);
    let has_preview = move || view_state.with(|s| s.preview_url.is_some());

    let on_start = {
        let ctx = ctx.clone();
        move |_| {
            ctx.run(|assistant| async move {
                assistant.start_camera().await;
            });
        }
    };

    let on_capture = {
        let ctx = ctx.clone();
        move |_| {
            ctx.run(|assistant| async move {
                assistant.capture().await;
            });
        }
    };

    let on_recapture = {
        let ctx = ctx.clone();
        move |_| {
            ctx.run(|assistant| async move {
                assistant.recapture().await;
            });
        }
    };

    let on_stop = {
        let ctx = ctx.clone();
        move |_| ctx.assistant.stop_camera()
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <h2 class="text-xl font-semibold">"Take a photo"</h2>

            // Stays mounted so the camera always has a surface to render into
            <video
                node_ref=ctx.video
                autoplay=true
                playsinline=true
                muted=true
                class="w-full rounded-lg bg-black"
                class:hidden=move || !active()
            />

            {move || {
                view_state
                    .with(|s| s.preview_url.clone())
                    .map(|url| view! {
                        <img src=url alt="Captured dish" class="w-full rounded-lg" />
                    })
            }}

            <div class="flex flex-wrap gap-2">
                <Show when=move || supported() && !active() && !has_preview()>
                    <button
                        on:click=on_start.clone()
                        class="bg-emerald-600 hover:bg-emerald-700 rounded-lg px-4 py-2 font-semibold"
                    >
                        "Start camera"
                    </button>
                </Show>

                <Show when=active>
                    <button
                        on:click=on_capture.clone()
                        class="bg-emerald-600 hover:bg-emerald-700 rounded-lg px-4 py-2 font-semibold"
                    >
                        "Capture Picture"
                    </button>
                    <button
                        on:click=on_stop.clone()
                        class="bg-gray-700 hover:bg-gray-600 rounded-lg px-4 py-2"
                    >
                        "Stop"
                    </button>
                </Show>

                <Show when=move || supported() && !active() && has_preview()>
                    <button
                        on:click=on_recapture.clone()
                        class="bg-gray-700 hover:bg-gray-600 rounded-lg px-4 py-2"
                    >
                        "Recapture"
                    </button>
                </Show>
            </div>

            <p class="text-sm text-gray-400">
                {move || view_state.with(|s| s.camera_status.clone())}
            </p>
        </section>
    }
}

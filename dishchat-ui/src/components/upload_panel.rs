//! Upload Panel
//!
//! File picker and the Analyse button.

use leptos::*;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;

use dishchat::image::content_type_for;
use dishchat::ImageFile;

use crate::components::InlineLoading;
use crate::media::blob::blob_to_bytes;
use crate::state::use_app_context;

/// Content type to send for a picked file; browsers leave it empty for
/// unknown extensions.
fn resolve_content_type(name: &str, reported: &str) -> String {
    if reported.is_empty() {
        content_type_for(name).to_string()
    } else {
        reported.to_string()
    }
}

/// Numbers file picks so only the latest finished read is applied.
#[derive(Default)]
struct PickSequence {
    latest: Cell<u64>,
}

impl PickSequence {
    fn next(&self) -> u64 {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        ticket
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }
}

async fn read_file(file: web_sys::File) -> Result<ImageFile, String> {
    let name = file.name();
    let content_type = resolve_content_type(&name, &file.type_());
    let bytes = blob_to_bytes(&file)
        .await
        .map_err(|e| format!("Failed to read {}: {:?}", name, e))?;
    Ok(ImageFile::new(name, content_type, bytes))
}

#[component]
pub fn UploadPanel() -> impl IntoView {
    let ctx = use_app_context();
    let view_state = ctx.view;

    let picks = Rc::new(PickSequence::default());
    let reading = create_rw_signal(false);

    let on_file_change = {
        let ctx = ctx.clone();
        move |ev: web_sys::Event| {
            let file = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));

            let ticket = picks.next();
            let Some(file) = file else {
                reading.set(false);
                ctx.assistant.select_image(None);
                return;
            };

            reading.set(true);
            let picks = Rc::clone(&picks);
            ctx.run(move |assistant| async move {
                let image = read_file(file).await;
                if !picks.is_latest(ticket) {
                    return;
                }
                reading.set(false);
                match image {
                    Ok(image) => assistant.select_image(Some(image)),
                    Err(e) => {
                        log::error!("{}", e);
                        assistant.select_image(None);
                    }
                }
            });
        }
    };

    let on_analyse = {
        let ctx = ctx.clone();
        move |_| {
            ctx.run(|assistant| async move {
                assistant.analyse().await;
            });
        }
    };

    let uploading = move || view_state.with(|s| s.uploading);
    let busy = move || uploading() || reading.get();

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <h2 class="text-xl font-semibold">"Upload a dish"</h2>

            <label class="block">
                <input
                    type="file"
                    accept="image/png,image/jpeg"
                    on:change=on_file_change
                    class="block w-full text-sm text-gray-300 file:mr-4 file:py-2 file:px-4
                           file:rounded-lg file:border-0 file:bg-gray-700 file:text-white"
                />
            </label>

            <p class="text-sm text-gray-400">
                {move || view_state.with(|s| s.selected_image_name.clone())}
            </p>

            <button
                on:click=on_analyse
                disabled=busy
                class="w-full bg-emerald-600 hover:bg-emerald-700 disabled:bg-gray-600
                       disabled:cursor-not-allowed rounded-lg py-3 font-semibold transition-colors"
            >
                {move || if uploading() { "Analysing..." } else { "Analyse" }}
            </button>

            <div class="flex items-center space-x-2 text-sm">
                {move || uploading().then(|| view! { <InlineLoading /> })}
                <span>{move || view_state.with(|s| s.analyse_status.clone())}</span>
            </div>
        </section>
    }
}

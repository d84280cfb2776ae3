//! Chat Panel
//!
//! Transcript and message box. Assistant entries are allow-listed HTML;
//! user messages are rendered as plain text.

use leptos::*;

use dishchat::{sanitize_html, ChatMessage, ChatRole};

use crate::components::InlineLoading;
use crate::state::use_app_context;

fn bubble_class(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "ml-auto bg-emerald-700 rounded-lg px-4 py-2 max-w-[80%] whitespace-pre-wrap",
        ChatRole::Assistant => "mr-auto bg-gray-700 rounded-lg px-4 py-2 max-w-[80%]",
    }
}

fn message_view(message: ChatMessage) -> View {
    let class = bubble_class(message.role);
    match message.role {
        ChatRole::Assistant => {
            let html = sanitize_html(&message.content);
            view! { <div class=class inner_html=html /> }.into_view()
        }
        ChatRole::User => view! { <div class=class>{message.content}</div> }.into_view(),
    }
}

#[component]
pub fn ChatPanel() -> impl IntoView {
    let ctx = use_app_context();
    let view_state = ctx.view;

    let loading = move || view_state.with(|s| s.chat_loading);

    let on_input = {
        let ctx = ctx.clone();
        move |ev: web_sys::Event| ctx.assistant.set_chat_input(event_target_value(&ev))
    };

    let on_submit = {
        let ctx = ctx.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            ctx.run(|assistant| async move {
                assistant.send_message().await;
            });
        }
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 flex flex-col space-y-4">
            <h2 class="text-xl font-semibold">"Recipe chat"</h2>

            <div class="flex flex-col space-y-3 max-h-[60vh] overflow-y-auto">
                {move || {
                    view_state.with(|s| {
                        s.transcript
                            .iter()
                            .cloned()
                            .map(message_view)
                            .collect_view()
                    })
                }}
                {move || loading().then(|| view! { <InlineLoading label="Thinking..." /> })}
            </div>

            <form on:submit=on_submit class="flex space-x-2">
                <input
                    type="text"
                    placeholder="Ask about the recipe..."
                    prop:value=move || view_state.with(|s| s.chat_input.clone())
                    on:input=on_input
                    class="flex-1 bg-gray-700 rounded-lg px-4 py-2 focus:outline-none focus:ring-2 focus:ring-emerald-500"
                />
                <button
                    type="submit"
                    disabled=loading
                    class="bg-emerald-600 hover:bg-emerald-700 disabled:bg-gray-600
                           disabled:cursor-not-allowed rounded-lg px-4 py-2 font-semibold"
                >
                    "Send"
                </button>
            </form>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_bubbles_keep_line_breaks() {
        assert!(bubble_class(ChatRole::User).contains("whitespace-pre-wrap"));
        assert!(!bubble_class(ChatRole::Assistant).contains("whitespace-pre-wrap"));
    }
}

//! Loading Component

use leptos::*;

/// Inline loading spinner with an optional label
#[component]
pub fn InlineLoading(
    #[prop(optional, into)]
    label: Option<String>,
) -> impl IntoView {
    view! {
        <span class="inline-flex items-center space-x-2 text-emerald-400">
            <span class="inline-block loading-spinner w-4 h-4" />
            {label.map(|text| view! { <span class="text-sm">{text}</span> })}
        </span>
    }
}

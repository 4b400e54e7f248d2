//! Inline error banner.

use leptos::prelude::*;

/// Shown only while `message` holds text.
#[component]
pub fn ErrorAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class="alert alert--error" role="alert">
                {move || message.get().unwrap_or_default()}
            </div>
        </Show>
    }
}

/// Success or info banner.
#[component]
pub fn NoticeAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class="alert alert--notice" role="status">
                {move || message.get().unwrap_or_default()}
            </div>
        </Show>
    }
}

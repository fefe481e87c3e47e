//! Status Messages
//!
//! Inline feedback lines shown above lists and panels.

use leptos::prelude::*;

/// Error or info line; renders nothing while `message` is `None`
#[component]
pub fn StatusMessage(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(optional)] info: bool,
) -> impl IntoView {
    let class = if info { "status-message info" } else { "status-message error" };

    view! {
        {move || message.get().map(|text| view! { <p class=class>{text}</p> })}
    }
}

/// Loading / error line for a lazy panel
#[component]
pub fn PanelStatus(
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <Show when=move || loading.get()>
            <div class="loading small">"Cargando..."</div>
        </Show>
        <StatusMessage message=error />
    }
}

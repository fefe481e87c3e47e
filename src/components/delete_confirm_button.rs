//! Delete Confirm Button Component
//!
//! Two-step delete: a × button that turns into an inline "¿Eliminar?"
//! prompt, then shows progress while the request runs.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Idle,
    Confirming,
}

/// Inline delete confirmation
///
/// * `what` - noun used in the tooltip ("reseña" → "Eliminar reseña")
/// * `busy` - true while the delete for this entry is in flight
/// * `on_confirm` - run once the user confirms
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] what: String,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let step = RwSignal::new(Step::Idle);
    let title = format!("Eliminar {}", what);

    move || {
        if busy.get() {
            return view! { <span class="delete-pending">"Eliminando..."</span> }.into_any();
        }
        match step.get() {
            Step::Idle => view! {
                <button
                    class="delete-btn"
                    title=title.clone()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        step.set(Step::Confirming);
                    }
                >
                    "×"
                </button>
            }
            .into_any(),
            Step::Confirming => view! {
                <span class="delete-confirm">
                    <span class="delete-confirm-text">"¿Eliminar?"</span>
                    <button
                        class="confirm-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            step.set(Step::Idle);
                            on_confirm.run(());
                        }
                    >
                        "✓"
                    </button>
                    <button
                        class="cancel-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            step.set(Step::Idle);
                        }
                    >
                        "✗"
                    </button>
                </span>
            }
            .into_any(),
        }
    }
}

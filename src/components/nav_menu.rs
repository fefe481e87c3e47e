//! Navigation Menu Component
//!
//! Collapsible menu overlay listing every screen except login.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::routes::Screen;

/// Hamburger button plus the screen list; hidden on the login screen
#[component]
pub fn NavMenu() -> impl IntoView {
    let (is_open, set_is_open) = signal(false);
    let location = use_location();
    let navigate = StoredValue::new_local(use_navigate());

    let on_login = move || Screen::from_path(&location.pathname.get()) == Some(Screen::Login);

    view! {
        <Show when=move || !on_login()>
            <div class="nav-menu">
                <button
                    class=move || if is_open.get() { "nav-burger open" } else { "nav-burger" }
                    on:click=move |_| set_is_open.update(|open| *open = !*open)
                >
                    "☰"
                </button>

                <Show when=move || is_open.get()>
                    <nav class="nav-menu-list">
                        {
                            Screen::menu().map(move |screen| {
                                view! {
                                    <button
                                        class="nav-link"
                                        on:click=move |_| {
                                            set_is_open.set(false);
                                            navigate.with_value(|nav| nav(&screen.path(), Default::default()));
                                        }
                                    >
                                        {screen.label()}
                                    </button>
                                }
                            }).collect_view()
                        }
                    </nav>
                </Show>
            </div>
        </Show>
    }
}

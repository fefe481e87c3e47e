//! UI Components
//!
//! Reusable Leptos components and the glue every screen uses to run
//! requests against its state signals.

mod delete_confirm_button;
mod nav_menu;
mod status_message;

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiResult;
use crate::state::{LazyPanel, LoadState};

pub use delete_confirm_button::DeleteConfirmButton;
pub use nav_menu::NavMenu;
pub use status_message::{PanelStatus, StatusMessage};

/// Blocking browser alert
pub fn alert(message: &str) {
    let Some(window) = web_sys::window() else {
        tracing::warn!("no window for alert: {}", message);
        return;
    };
    if let Err(err) = window.alert_with_message(message) {
        tracing::warn!("alert failed: {:?}", err);
    }
}

/// Mark `state` loading and apply `request`'s result when it resolves
pub fn load_into<T, Fut>(state: RwSignal<LoadState<T>>, fallback: &'static str, request: Fut)
where
    T: Send + Sync + 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    state.update(LoadState::begin);
    spawn_local(async move {
        let result = request.await;
        state.update(|s| s.finish(result, fallback));
    });
}

/// Like [`load_into`], but for single-result lookups: the previous result
/// is cleared first so a miss never leaves it on screen
pub fn lookup_into<T, Fut>(state: RwSignal<LoadState<T>>, fallback: &'static str, request: Fut)
where
    T: Send + Sync + 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    state.update(LoadState::restart);
    spawn_local(async move {
        let result = request.await;
        state.update(|s| s.finish(result, fallback));
    });
}

/// Toggle a lazy panel, fetching its content only on first reveal
pub fn toggle_lazy<T, F, Fut>(panel: RwSignal<LazyPanel<T>>, fallback: &'static str, fetch: F)
where
    T: Send + Sync + 'static,
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    let mut needs_fetch = false;
    panel.update(|p| needs_fetch = p.toggle());
    if needs_fetch {
        spawn_local(async move {
            let result = fetch().await;
            panel.update(|p| p.loaded(result, fallback));
        });
    }
}

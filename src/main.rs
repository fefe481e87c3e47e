//! Restaurant Admin Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod forms;
mod models;
mod routes;
mod screens;
mod state;

use app::App;
use leptos::prelude::*;

use crate::config::ApiConfig;

fn main() {
    console_error_panic_hook::set_once();

    let config = ApiConfig::load();
    if let Err(err) = console_logger::init_logger("RestaurantAdmin", config.log_level) {
        web_sys::console::warn_1(&format!("logger not installed: {}", err).into());
    }
    tracing::info!(base_url = %config.base_url, "starting restaurant admin");

    mount_to_body(move || view! { <App config=config /> });
}

//! Restaurant Admin App
//!
//! Router shell: navigation menu plus one route per screen.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::StaticSegment;

use crate::components::NavMenu;
use crate::config::ApiConfig;
use crate::context::AppContext;
use crate::routes::Screen;
use crate::screens::{
    LoginScreen, MenuScreen, OrdersScreen, ReportsScreen, RestaurantsScreen, ReviewsScreen, UsersScreen,
};

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="screen not-found">
            <h1>"Página no encontrada"</h1>
            <A href=Screen::Login.path()>"Volver al inicio"</A>
        </div>
    }
}

#[component]
pub fn App(config: ApiConfig) -> impl IntoView {
    // Provide context to all screens
    provide_context(AppContext::new(&config));

    view! {
        <Router>
            <NavMenu />
            <main class="app-content">
                <Routes fallback=NotFound>
                    <Route path=StaticSegment(Screen::Login.segment()) view=LoginScreen />
                    <Route path=StaticSegment(Screen::Users.segment()) view=UsersScreen />
                    <Route path=StaticSegment(Screen::Restaurants.segment()) view=RestaurantsScreen />
                    <Route path=StaticSegment(Screen::Menu.segment()) view=MenuScreen />
                    <Route path=StaticSegment(Screen::Orders.segment()) view=OrdersScreen />
                    <Route path=StaticSegment(Screen::Reviews.segment()) view=ReviewsScreen />
                    <Route path=StaticSegment(Screen::Reports.segment()) view=ReportsScreen />
                </Routes>
            </main>
        </Router>
    }
}

//! Reports Screen
//!
//! Three aggregate reports, each fetched the first time it is opened.

use leptos::prelude::*;

use crate::api::{average_ratings, best_selling_dishes, users_by_municipality};
use crate::components::{toggle_lazy, PanelStatus};
use crate::context::use_app_context;
use crate::models::{MunicipalityCount, RestaurantRating, RestaurantSales};
use crate::state::LazyPanel;

fn panel_status<T: Send + Sync + 'static>(panel: RwSignal<LazyPanel<T>>) -> impl IntoView {
    view! {
        <PanelStatus
            loading=Signal::derive(move || panel.with(LazyPanel::is_loading))
            error=Signal::derive(move || panel.with(|p| p.error().map(str::to_string)))
        />
    }
}

fn toggle_label(shown: bool, title: &str) -> String {
    if shown {
        format!("Ocultar {}", title)
    } else {
        format!("Ver {}", title)
    }
}

#[component]
pub fn ReportsScreen() -> impl IntoView {
    let ctx = use_app_context();

    let municipalities = RwSignal::new(LazyPanel::<Vec<MunicipalityCount>>::default());
    let dishes = RwSignal::new(LazyPanel::<Vec<RestaurantSales>>::default());
    let ratings = RwSignal::new(LazyPanel::<Vec<RestaurantRating>>::default());

    view! {
        <div class="screen reports-screen">
            <h1>"Reportes"</h1>

            // ===== Users per municipality =====
            <section class="report">
                <button on:click=move |_| {
                    let api = ctx.transport();
                    toggle_lazy(municipalities, "Error al cargar el reporte de usuarios", move || async move {
                        users_by_municipality(&api).await
                    });
                }>
                    {move || toggle_label(municipalities.with(LazyPanel::is_shown), "usuarios por municipio")}
                </button>
                {panel_status(municipalities)}
                <Show when=move || municipalities.with(LazyPanel::is_shown)>
                    <table class="data-table">
                        <thead>
                            <tr><th>"Municipio"</th><th>"Usuarios"</th></tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || municipalities.with(|p| p.shown().cloned().unwrap_or_default())
                                key=|row| row.municipality.clone()
                                children=move |row| view! {
                                    <tr><td>{row.municipality}</td><td>{row.users}</td></tr>
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </section>

            // ===== Best-selling dishes =====
            <section class="report">
                <button on:click=move |_| {
                    let api = ctx.transport();
                    toggle_lazy(dishes, "Error al cargar el reporte de platos", move || async move {
                        best_selling_dishes(&api).await
                    });
                }>
                    {move || toggle_label(dishes.with(LazyPanel::is_shown), "platos más vendidos")}
                </button>
                {panel_status(dishes)}
                <Show when=move || dishes.with(LazyPanel::is_shown)>
                    <For
                        each=move || dishes.with(|p| p.shown().cloned().unwrap_or_default())
                        key=|row| row.restaurant.clone()
                        children=move |row| view! {
                            <div class="card">
                                <h3>{row.restaurant}</h3>
                                <ul>
                                    {row.dishes.into_iter().map(|dish| view! {
                                        <li>{format!("{}: {} vendidos a Q{:.2}", dish.dish, dish.quantity, dish.price)}</li>
                                    }).collect_view()}
                                </ul>
                            </div>
                        }
                    />
                </Show>
            </section>

            // ===== Average ratings =====
            <section class="report">
                <button on:click=move |_| {
                    let api = ctx.transport();
                    toggle_lazy(ratings, "Error al cargar el reporte de calificaciones", move || async move {
                        average_ratings(&api).await
                    });
                }>
                    {move || toggle_label(ratings.with(LazyPanel::is_shown), "calificaciones promedio")}
                </button>
                {panel_status(ratings)}
                <Show when=move || ratings.with(LazyPanel::is_shown)>
                    <table class="data-table">
                        <thead>
                            <tr><th>"Restaurante"</th><th>"Promedio"</th><th>"Reseñas"</th></tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || ratings.with(|p| p.shown().cloned().unwrap_or_default())
                                key=|row| row.restaurant.clone()
                                children=move |row| view! {
                                    <tr>
                                        <td>{row.restaurant}</td>
                                        <td>{format!("{:.2}", row.average)}</td>
                                        <td>{row.reviews}</td>
                                    </tr>
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use serde_json::json;

    #[test]
    fn test_toggle_label() {
        assert_eq!(toggle_label(false, "platos"), "Ver platos");
        assert_eq!(toggle_label(true, "platos"), "Ocultar platos");
    }

    #[tokio::test]
    async fn test_report_panels_are_independent_and_cached() {
        let mock = MockTransport::new();
        mock.ok(
            Method::GET,
            "/reportes/usuarios_por_municipio",
            json!({ "usuarios_por_municipio": [{ "_id": "Mixco", "total_usuarios": 4 }] }),
        );
        mock.ok(
            Method::GET,
            "/reportes/calificaciones_promedio_restaurantes",
            json!({ "calificaciones_promedio_restaurantes": [
                { "restaurante_nombre": "Casa", "calificacion_promedio": 4.25, "total_reseñas": 8 }
            ] }),
        );

        let mut users = LazyPanel::default();
        let mut ratings = LazyPanel::default();

        // show, hide, show
        for _ in 0..3 {
            if users.toggle() {
                users.loaded(users_by_municipality(&mock).await, "fallo");
            }
        }
        if ratings.toggle() {
            ratings.loaded(average_ratings(&mock).await, "fallo");
        }

        assert_eq!(mock.count(&Method::GET, "/reportes/usuarios_por_municipio"), 1);
        assert_eq!(mock.count(&Method::GET, "/reportes/calificaciones_promedio_restaurantes"), 1);
        assert_eq!(mock.count(&Method::GET, "/reportes/platos_mas_vendidos"), 0);
        assert_eq!(users.shown().map(|rows| rows[0].users), Some(4));
        assert_eq!(ratings.shown().map(|rows| rows[0].reviews), Some(8));
    }
}

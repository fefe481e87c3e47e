//! Restaurants Screen
//!
//! Paged listing, city/category filter, restaurants-per-city panel and the
//! bulk creation form.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{
    create_restaurants, filter_restaurants, list_restaurants, restaurants_by_city, Ack, ApiResult, Page,
    Refreshed, RestaurantFilter, Transport,
};
use crate::components::{alert, load_into, toggle_lazy, PanelStatus, StatusMessage};
use crate::context::use_app_context;
use crate::forms::{validate_restaurant_rows, RestaurantField, RestaurantRow};
use crate::models::{or_unknown, CityCount, Restaurant};
use crate::state::{LazyPanel, LoadState};

const LOAD_FAILED: &str = "Error al cargar restaurantes";
const NO_MATCHES: &str = "No se encontraron restaurantes con esos filtros";

/// Apply a filter response: a 404 means no matches and empties the list
pub fn show_filtered(state: &mut LoadState<Vec<Restaurant>>, result: ApiResult<Vec<Restaurant>>) {
    match result {
        Err(err) if err.is_not_found() => state.fail_with(err.user_message(NO_MATCHES), Vec::new()),
        other => state.finish(other, "Error al filtrar restaurantes"),
    }
}

/// Validate every row, create them in one call, then reload `page`
pub async fn submit_bulk(
    api: &dyn Transport,
    rows: &[RestaurantRow],
    page: Page,
) -> ApiResult<Refreshed<Ack, Vec<Restaurant>>> {
    let restaurants = validate_restaurant_rows(rows)?;
    let receipt = create_restaurants(api, &restaurants).await?;
    Ok(receipt.refresh(|| list_restaurants(api, page)).await)
}

// ===== Bulk Form =====

#[component]
fn BulkForm(rows: RwSignal<Option<Vec<RestaurantRow>>>, on_submit: Callback<()>) -> impl IntoView {
    let row_count = move || rows.with(|r| r.as_ref().map(Vec::len).unwrap_or(0));

    view! {
        <form
            class="bulk-form"
            on:submit=move |ev: web_sys::SubmitEvent| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <For
                each=move || 0..row_count()
                key=|i| *i
                children=move |i| view! {
                    <fieldset class="bulk-row">
                        <legend>{format!("Restaurante {}", i + 1)}</legend>
                        {RestaurantField::ALL.into_iter().map(move |field| view! {
                            <input
                                type="text"
                                class:numeric=field.is_numeric()
                                placeholder=field.placeholder()
                                prop:value=move || rows.with(|r| {
                                    r.as_ref()
                                        .and_then(|r| r.get(i))
                                        .map(|row| row.get(field).to_string())
                                        .unwrap_or_default()
                                })
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    rows.update(|r| {
                                        if let Some(row) = r.as_mut().and_then(|r| r.get_mut(i)) {
                                            row.set(field, value);
                                        }
                                    });
                                }
                            />
                        }).collect_view()}
                    </fieldset>
                }
            />
            <div class="form-actions">
                <button
                    type="button"
                    on:click=move |_| rows.update(|r| {
                        if let Some(r) = r {
                            r.push(RestaurantRow::default());
                        }
                    })
                >
                    "+ Agregar fila"
                </button>
                <button type="submit">"Crear restaurantes"</button>
            </div>
        </form>
    }
}

// ===== Screen =====

#[component]
pub fn RestaurantsScreen() -> impl IntoView {
    let ctx = use_app_context();

    let restaurants = RwSignal::new(LoadState::<Vec<Restaurant>>::default());
    let page = RwSignal::new(Page::default());
    let (filtered, set_filtered) = signal(false);
    let city = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let by_city = RwSignal::new(LazyPanel::<Vec<CityCount>>::default());
    let creating = RwSignal::new(None::<Vec<RestaurantRow>>);

    let load_page = move |target: Page| {
        let api = ctx.transport();
        page.set(target);
        set_filtered.set(false);
        load_into(restaurants, LOAD_FAILED, async move { list_restaurants(&api, target).await });
    };
    load_page(Page::default());

    let on_filter = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let filter = RestaurantFilter::new(&city.get_untracked(), &category.get_untracked());
        let api = ctx.transport();
        restaurants.update(LoadState::begin);
        set_filtered.set(true);
        spawn_local(async move {
            let result = filter_restaurants(&api, &filter).await;
            restaurants.update(|s| show_filtered(s, result));
        });
    };

    let on_clear_filter = move |_| {
        city.set(String::new());
        category.set(String::new());
        load_page(Page::default());
    };

    let on_toggle_cities = move |_| {
        let api = ctx.transport();
        toggle_lazy(by_city, "Error al cargar restaurantes por ciudad", move || async move {
            restaurants_by_city(&api).await
        });
    };

    let on_bulk_submit = Callback::new(move |_: ()| {
        let Some(rows) = creating.get_untracked() else {
            return;
        };
        let api = ctx.transport();
        let current = page.get_untracked();
        spawn_local(async move {
            match submit_bulk(&api, &rows, current).await {
                Ok(done) => {
                    alert(done.ack.message.as_deref().unwrap_or("Restaurantes creados"));
                    creating.set(None);
                    set_filtered.set(false);
                    restaurants.update(|s| s.finish(done.refreshed, LOAD_FAILED));
                }
                Err(err) => {
                    tracing::warn!("bulk create failed: {}", err);
                    alert(&err.user_message("Error al crear restaurantes"));
                }
            }
        });
    });

    view! {
        <div class="screen restaurants-screen">
            <h1>"Restaurantes"</h1>

            <form class="filter-form" on:submit=on_filter>
                <input
                    type="text"
                    placeholder="Ciudad"
                    prop:value=move || city.get()
                    on:input=move |ev| city.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Categoría"
                    prop:value=move || category.get()
                    on:input=move |ev| category.set(event_target_value(&ev))
                />
                <button type="submit">"Filtrar"</button>
                <Show when=move || filtered.get()>
                    <button type="button" on:click=on_clear_filter>"Limpiar filtro"</button>
                </Show>
            </form>

            <div class="toolbar">
                <button on:click=on_toggle_cities>
                    {move || if by_city.with(LazyPanel::is_shown) { "Ocultar por ciudad" } else { "Restaurantes por ciudad" }}
                </button>
                <button on:click=move |_| creating.update(|c| {
                    *c = match c.take() {
                        Some(_) => None,
                        None => Some(vec![RestaurantRow::default()]),
                    }
                })>
                    {move || if creating.with(Option::is_some) { "Cancelar" } else { "Nuevo restaurante" }}
                </button>
            </div>

            <PanelStatus
                loading=Signal::derive(move || by_city.with(LazyPanel::is_loading))
                error=Signal::derive(move || by_city.with(|p| p.error().map(str::to_string)))
            />
            <Show when=move || by_city.with(LazyPanel::is_shown)>
                <ul class="aggregate-list">
                    <For
                        each=move || by_city.with(|p| p.shown().cloned().unwrap_or_default())
                        key=|c| c.city.clone()
                        children=move |c| view! {
                            <li>{c.city}": "{c.restaurants}</li>
                        }
                    />
                </ul>
            </Show>

            <Show when=move || creating.with(Option::is_some)>
                <BulkForm rows=creating on_submit=on_bulk_submit />
            </Show>

            <Show when=move || restaurants.with(LoadState::is_loading)>
                <div class="loading">"Cargando..."</div>
            </Show>
            <StatusMessage message=Signal::derive(move || restaurants.with(|s| s.error().map(str::to_string))) />

            <div class="card-grid">
                <For
                    each=move || restaurants.with(LoadState::rows)
                    key=|r| r.id.clone()
                    children=move |r| view! {
                        <div class="card">
                            <h3>{or_unknown(r.name.as_deref(), "Sin nombre")}</h3>
                            <p>"Categoría: "{or_unknown(r.category.as_deref(), "N/D")}</p>
                            <p>
                                "Ciudad: "{or_unknown(r.city.as_deref(), "N/D")}
                                ", "{or_unknown(r.department.as_deref(), "N/D")}
                            </p>
                            <p>"Horario: "{or_unknown(r.hours.as_deref(), "N/D")}</p>
                            <p>
                                "Calificación: "
                                {r.average_rating.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "N/D".to_string())}
                            </p>
                        </div>
                    }
                />
            </div>

            <Show when=move || !filtered.get()>
                <div class="pager">
                    <button
                        disabled=move || page.with(Page::is_first)
                        on:click=move |_| load_page(page.get_untracked().previous())
                    >
                        "Anterior"
                    </button>
                    <span>{move || format!("Página {}", page.with(Page::number))}</span>
                    <button on:click=move |_| load_page(page.get_untracked().next())>"Siguiente"</button>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::{ApiError, Method};
    use serde_json::json;

    fn row(name: &str) -> RestaurantRow {
        RestaurantRow {
            name: name.into(),
            category: "Italiana".into(),
            city: "Guatemala".into(),
            department: "Guatemala".into(),
            hours: "9:00-21:00".into(),
            rating: "4,5".into(),
            latitude: "14.6".into(),
            longitude: "-90.5".into(),
        }
    }

    #[tokio::test]
    async fn test_filter_404_empties_list_with_message() {
        let mock = MockTransport::new();
        mock.respond(
            Method::GET,
            "/restaurantes/filtro",
            Err(ApiError::NotFound("No se encontraron restaurantes".into())),
        );

        let mut state = LoadState::Loaded(vec![serde_json::from_value::<Restaurant>(json!({ "_id": "r1" })).unwrap()]);
        let filter = RestaurantFilter::new("Cobán", "");
        show_filtered(&mut state, filter_restaurants(&mock, &filter).await);

        assert!(state.rows().is_empty());
        assert_eq!(state.error(), Some("No se encontraron restaurantes"));
        assert_eq!(mock.requests()[0].query_value("ciudad"), Some("Cobán"));
    }

    #[tokio::test]
    async fn test_empty_filter_keeps_list_and_sends_nothing() {
        let mock = MockTransport::new();
        let kept = serde_json::from_value::<Restaurant>(json!({ "_id": "r1", "nombre": "Pollo" })).unwrap();
        let mut state = LoadState::Loaded(vec![kept.clone()]);

        show_filtered(&mut state, filter_restaurants(&mock, &RestaurantFilter::new(" ", "")).await);

        assert!(mock.requests().is_empty());
        assert_eq!(state.rows(), vec![kept]);
        assert_eq!(
            state.error(),
            Some("Debes ingresar al menos una ciudad o categoría para filtrar.")
        );
    }

    #[tokio::test]
    async fn test_bulk_create_is_one_request_then_refresh() {
        let mock = MockTransport::new();
        mock.ok(Method::POST, "/restaurantes/bulk", json!({ "mensaje": "2 restaurantes creados" }));
        mock.ok(Method::GET, "/restaurantes", json!([{ "_id": "n1" }, { "_id": "n2" }]));

        let done = submit_bulk(&mock, &[row("Uno"), row("Dos")], Page::default()).await.unwrap();
        assert_eq!(done.ack.message.as_deref(), Some("2 restaurantes creados"));
        assert_eq!(done.refreshed.unwrap().len(), 2);

        let posts = mock.calls(&Method::POST, "/restaurantes/bulk");
        assert_eq!(posts.len(), 1);
        let body = posts[0].body.clone().unwrap();
        assert_eq!(body.as_array().map(Vec::len), Some(2));
        assert_eq!(body[0]["calificacion_promedio"], json!(4.5));
        assert_eq!(mock.calls(&Method::GET, "/restaurantes")[0].query_value("skip"), Some("0"));
    }

    #[tokio::test]
    async fn test_bulk_create_rejects_invalid_row() {
        let mock = MockTransport::new();
        let mut bad = row("Tres");
        bad.rating = "7".into();

        let err = submit_bulk(&mock, &[row("Uno"), bad], Page::default()).await.unwrap_err();
        assert_eq!(err, ApiError::Validation("Fila 2: La calificación debe estar entre 0 y 5.".into()));
        assert!(mock.requests().is_empty());
    }
}

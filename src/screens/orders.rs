//! Orders Screen
//!
//! Order listing, minimum-total filter, lookup by id and the batch status
//! update form.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{get_order, list_orders, orders_above, update_order_statuses, Ack, ApiResult, Refreshed, Transport};
use crate::components::{alert, load_into, lookup_into, StatusMessage};
use crate::context::use_app_context;
use crate::forms::{collect_status_updates, parse_minimum_total, StatusRow};
use crate::models::{format_date, Order, OrderStatus};
use crate::state::LoadState;

const LOAD_FAILED: &str = "Error al cargar órdenes";
const FILTER_FAILED: &str = "No se encontraron órdenes con ese criterio.";

/// Orders above the typed minimum; bad input never reaches the backend
pub async fn filter_by_minimum(api: &dyn Transport, raw: &str) -> ApiResult<Vec<Order>> {
    let minimum = parse_minimum_total(raw)?;
    orders_above(api, minimum).await
}

/// Send every filled row as one batch, then reload the full listing
pub async fn submit_statuses(api: &dyn Transport, rows: &[StatusRow]) -> ApiResult<Refreshed<Ack, Vec<Order>>> {
    let updates = collect_status_updates(rows)?;
    let receipt = update_order_statuses(api, &updates).await?;
    Ok(receipt.refresh(|| list_orders(api)).await)
}

fn money(value: f64) -> String {
    format!("Q{:.2}", value)
}

// ===== Order Card =====

#[component]
fn OrderCard(order: Order) -> impl IntoView {
    let status_class = format!("status status-{}", order.status.as_str().to_lowercase());
    let lines = (!order.items.is_empty()).then(|| {
        let lines = order
            .items
            .iter()
            .map(|line| {
                let discount = if line.discount > 0.0 {
                    format!(" (-{})", money(line.discount))
                } else {
                    String::new()
                };
                let text = format!("{} × {} a {}{}", line.quantity, line.item_id, money(line.unit_price), discount);
                view! { <li>{text}</li> }
            })
            .collect_view();
        view! { <ul class="order-lines">{lines}</ul> }
    });

    view! {
        <div class="card order-card">
            <h3>"Orden "{order.id}</h3>
            <p>"Usuario: "{order.user_id}</p>
            <p>"Restaurante: "{order.restaurant_id}</p>
            <p>"Fecha: "{format_date(&order.date)}</p>
            <p>"Estado: "<span class=status_class>{order.status.as_str()}</span></p>
            <p>"Total: "{money(order.total)}</p>
            {lines}
        </div>
    }
}

// ===== Status Form =====

#[component]
fn StatusForm(rows: RwSignal<Option<Vec<StatusRow>>>, on_submit: Callback<()>) -> impl IntoView {
    let row_count = move || rows.with(|r| r.as_ref().map(Vec::len).unwrap_or(0));
    let cell = move |i: usize, get: fn(&StatusRow) -> &String| {
        rows.with(|r| r.as_ref().and_then(|r| r.get(i)).map(|row| get(row).clone()).unwrap_or_default())
    };
    let edit = move |i: usize, set: fn(&mut StatusRow, String), value: String| {
        rows.update(|r| {
            if let Some(row) = r.as_mut().and_then(|r| r.get_mut(i)) {
                set(row, value);
            }
        });
    };

    view! {
        <form
            class="status-form"
            on:submit=move |ev: web_sys::SubmitEvent| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <For
                each=move || 0..row_count()
                key=|i| *i
                children=move |i| view! {
                    <div class="status-row">
                        <input
                            type="text"
                            placeholder="ID de la orden"
                            prop:value=move || cell(i, |row| &row.id)
                            on:input=move |ev| edit(i, |row, v| row.id = v, event_target_value(&ev))
                        />
                        <select
                            prop:value=move || cell(i, |row| &row.status)
                            on:change=move |ev| edit(i, |row, v| row.status = v, event_target_value(&ev))
                        >
                            <option value="">"Estado..."</option>
                            {OrderStatus::ALL.into_iter().map(|status| view! {
                                <option value=status.as_str()>{status.as_str()}</option>
                            }).collect_view()}
                        </select>
                    </div>
                }
            />
            <div class="form-actions">
                <button
                    type="button"
                    on:click=move |_| rows.update(|r| {
                        if let Some(r) = r {
                            r.push(StatusRow::default());
                        }
                    })
                >
                    "+ Agregar orden"
                </button>
                <button type="submit">"Actualizar estados"</button>
            </div>
        </form>
    }
}

// ===== Screen =====

#[component]
pub fn OrdersScreen() -> impl IntoView {
    let ctx = use_app_context();

    let orders = RwSignal::new(LoadState::<Vec<Order>>::default());
    let selected = RwSignal::new(LoadState::<Order>::default());
    let minimum = RwSignal::new(String::new());
    let lookup_id = RwSignal::new(String::new());
    let editing = RwSignal::new(None::<Vec<StatusRow>>);

    let load_all = move || {
        let api = ctx.transport();
        load_into(orders, LOAD_FAILED, async move { list_orders(&api).await });
    };
    load_all();

    let on_filter = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = ctx.transport();
        let raw = minimum.get_untracked();
        load_into(orders, FILTER_FAILED, async move { filter_by_minimum(&api, &raw).await });
    };

    let on_lookup = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = ctx.transport();
        let id = lookup_id.get_untracked();
        lookup_into(selected, "Orden no encontrada.", async move { get_order(&api, &id).await });
    };

    let on_status_submit = Callback::new(move |_: ()| {
        let Some(rows) = editing.get_untracked() else {
            return;
        };
        let api = ctx.transport();
        spawn_local(async move {
            match submit_statuses(&api, &rows).await {
                Ok(done) => {
                    alert(done.ack.message.as_deref().unwrap_or("Estados actualizados"));
                    editing.set(None);
                    orders.update(|s| s.finish(done.refreshed, LOAD_FAILED));
                }
                Err(err) => {
                    tracing::warn!("status update failed: {}", err);
                    alert(&err.user_message("Error al actualizar estados"));
                }
            }
        });
    });

    view! {
        <div class="screen orders-screen">
            <h1>"Órdenes"</h1>

            <div class="toolbar">
                <form class="filter-form" on:submit=on_filter>
                    <input
                        type="text"
                        placeholder="Total mínimo"
                        prop:value=move || minimum.get()
                        on:input=move |ev| minimum.set(event_target_value(&ev))
                    />
                    <button type="submit">"Filtrar"</button>
                    <button
                        type="button"
                        on:click=move |_| {
                            minimum.set(String::new());
                            load_all();
                        }
                    >
                        "Ver todas"
                    </button>
                </form>

                <form class="filter-form" on:submit=on_lookup>
                    <input
                        type="text"
                        placeholder="ID de la orden"
                        prop:value=move || lookup_id.get()
                        on:input=move |ev| lookup_id.set(event_target_value(&ev))
                    />
                    <button type="submit">"Buscar"</button>
                </form>

                <button on:click=move |_| editing.update(|e| {
                    *e = match e.take() {
                        Some(_) => None,
                        None => Some(vec![StatusRow::default()]),
                    }
                })>
                    {move || if editing.with(Option::is_some) { "Cancelar" } else { "Actualizar estados" }}
                </button>
            </div>

            <Show when=move || editing.with(Option::is_some)>
                <StatusForm rows=editing on_submit=on_status_submit />
            </Show>

            <StatusMessage message=Signal::derive(move || selected.with(|s| s.error().map(str::to_string))) />
            {move || selected.with(|s| s.data().cloned()).map(|order| view! {
                <div class="lookup-result">
                    <OrderCard order=order />
                    <button on:click=move |_| selected.set(LoadState::Idle)>"Cerrar"</button>
                </div>
            })}

            <Show when=move || orders.with(LoadState::is_loading)>
                <div class="loading">"Cargando..."</div>
            </Show>
            <StatusMessage message=Signal::derive(move || orders.with(|s| s.error().map(str::to_string))) />

            <div class="card-grid">
                <For
                    each=move || orders.with(LoadState::rows)
                    key=|order| (order.id.clone(), order.status)
                    children=move |order| view! { <OrderCard order=order /> }
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::{ApiError, Method};
    use serde_json::json;

    fn order(id: &str, status: &str, total: f64) -> serde_json::Value {
        json!({
            "_id": id,
            "usuario_id": "u1",
            "restaurante_id": "r1",
            "fecha": "2026-10-01T12:30:00",
            "estado": status,
            "total": total,
            "items": [{ "item_id": "m1", "cantidad": 2, "precio_unitario": 45.0, "descuento": 0.0 }]
        })
    }

    fn row(id: &str, status: &str) -> StatusRow {
        StatusRow { id: id.into(), status: status.into() }
    }

    #[tokio::test]
    async fn test_batch_update_is_one_request_and_refresh_shows_new_statuses() {
        let mock = MockTransport::new();
        mock.ok(Method::PUT, "/actualizarEstadosOrdenes", json!({ "mensaje": "3 órdenes actualizadas" }));
        mock.ok(
            Method::GET,
            "/ordenes",
            json!([
                order("o1", "Entregado", 90.0),
                order("o2", "Cancelado", 45.0),
                order("o3", "Preparando", 120.0)
            ]),
        );

        let rows = vec![
            row("o1", "Entregado"),
            row("", ""),
            row("o2", "Cancelado"),
            row("o3", "Preparando"),
        ];
        let done = submit_statuses(&mock, &rows).await.unwrap();

        let puts = mock.calls(&Method::PUT, "/actualizarEstadosOrdenes");
        assert_eq!(puts.len(), 1);
        assert_eq!(
            puts[0].body,
            Some(json!([
                { "id": "o1", "estado": "Entregado" },
                { "id": "o2", "estado": "Cancelado" },
                { "id": "o3", "estado": "Preparando" }
            ]))
        );

        let statuses: Vec<OrderStatus> = done.refreshed.unwrap().into_iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            vec![OrderStatus::Delivered, OrderStatus::Cancelled, OrderStatus::Preparing]
        );
    }

    #[tokio::test]
    async fn test_half_filled_row_rejected() {
        let mock = MockTransport::new();
        let err = submit_statuses(&mock, &[row("o1", "")]).await.unwrap_err();
        assert_eq!(err, ApiError::Validation("Fila 1: selecciona un estado.".into()));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_minimum_filter_parses_input() {
        let mock = MockTransport::new();
        mock.ok(Method::GET, "/ordenes/mayores", json!([order("o3", "Pendiente", 120.0)]));

        let rows = filter_by_minimum(&mock, "100,5").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(mock.requests()[0].query_value("goal"), Some("100.5"));

        assert!(filter_by_minimum(&mock, "mucho").await.is_err());
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_miss_reports_without_touching_listing() {
        let mock = MockTransport::new();
        mock.ok(Method::GET, "/orden/zzz", json!({ "mensaje": "Orden no encontrada" }));

        let mut selected = LoadState::default();
        selected.finish(get_order(&mock, "zzz").await, "fallo");

        assert_eq!(selected.error(), Some("Orden no encontrada"));
        assert_eq!(mock.count(&Method::GET, "/ordenes"), 0);
    }

    #[tokio::test]
    async fn test_missed_lookup_clears_previous_order() {
        let mock = MockTransport::new();
        mock.ok(Method::GET, "/orden/o1", order("o1", "Pendiente", 90.0));
        mock.ok(Method::GET, "/orden/zzz", json!({ "mensaje": "Orden no encontrada" }));

        let mut selected = LoadState::default();
        selected.restart();
        selected.finish(get_order(&mock, "o1").await, "fallo");
        assert_eq!(selected.data().map(|o| o.id.as_str()), Some("o1"));

        selected.restart();
        selected.finish(get_order(&mock, "zzz").await, "fallo");
        assert_eq!(selected.error(), Some("Orden no encontrada"));
        assert!(selected.data().is_none());
    }

    #[tokio::test]
    async fn test_failed_minimum_filter_says_nothing_matched() {
        let mock = MockTransport::new();
        mock.respond(
            Method::GET,
            "/ordenes/mayores",
            Err(ApiError::Status { status: 500, message: "Internal Server Error".into() }),
        );

        let mut orders = LoadState::Loaded(Vec::new());
        orders.finish(filter_by_minimum(&mock, "50").await, FILTER_FAILED);
        assert_eq!(orders.error(), Some("No se encontraron órdenes con ese criterio."));
    }
}

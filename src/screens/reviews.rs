//! Reviews Screen
//!
//! Review listing in backend or rating order, with per-review delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{delete_review, list_reviews, ReviewOrder};
use crate::components::{alert, load_into, DeleteConfirmButton, StatusMessage};
use crate::context::use_app_context;
use crate::models::{format_date, Review};
use crate::state::LoadState;

const LOAD_FAILED: &str = "Error al cargar reseñas";

/// Drop the first review with `id`; duplicates beyond it stay
pub fn remove_first(reviews: &mut Vec<Review>, id: &str) -> bool {
    match reviews.iter().position(|r| r.id == id) {
        Some(index) => {
            reviews.remove(index);
            true
        }
        None => false,
    }
}

#[component]
pub fn ReviewsScreen() -> impl IntoView {
    let ctx = use_app_context();

    let reviews = RwSignal::new(LoadState::<Vec<Review>>::default());
    let (order, set_order) = signal(ReviewOrder::default());
    let deleting = RwSignal::new(None::<String>);

    let load = move |target: ReviewOrder| {
        let api = ctx.transport();
        set_order.set(target);
        load_into(reviews, LOAD_FAILED, async move { list_reviews(&api, target).await });
    };
    load(ReviewOrder::Default);

    let on_delete = move |id: String| {
        let api = ctx.transport();
        let current = order.get_untracked();
        deleting.set(Some(id.clone()));
        spawn_local(async move {
            match delete_review(&api, &id).await {
                Ok(receipt) => {
                    reviews.update(|s| {
                        if let Some(rows) = s.data_mut() {
                            remove_first(rows, &id);
                        }
                    });
                    let done = receipt.refresh(|| list_reviews(&api, current)).await;
                    reviews.update(|s| s.finish(done.refreshed, LOAD_FAILED));
                }
                Err(err) => {
                    tracing::warn!(%id, "review delete failed: {}", err);
                    alert(&err.user_message("Error al eliminar reseña"));
                }
            }
            deleting.set(None);
        });
    };

    view! {
        <div class="screen reviews-screen">
            <h1>"Reseñas"</h1>

            <div class="toolbar">
                <button
                    class:active=move || order.get() == ReviewOrder::Default
                    on:click=move |_| load(ReviewOrder::Default)
                >
                    "Recientes"
                </button>
                <button
                    class:active=move || order.get() == ReviewOrder::ByRating
                    on:click=move |_| load(ReviewOrder::ByRating)
                >
                    "Ordenar por calificación"
                </button>
            </div>

            <Show when=move || reviews.with(LoadState::is_loading)>
                <div class="loading">"Cargando..."</div>
            </Show>
            <StatusMessage message=Signal::derive(move || reviews.with(|s| s.error().map(str::to_string))) />

            <Show
                when=move || reviews.with(|s| s.is_loading() || s.data().is_some_and(|rows| !rows.is_empty()))
                fallback=|| view! { <p class="empty">"No hay reseñas disponibles."</p> }
            >
                <div class="card-grid">
                    <For
                        each=move || reviews.with(LoadState::rows)
                        key=|review| review.id.clone()
                        children=move |review| {
                            let id = review.id.clone();
                            let busy_id = review.id.clone();
                            let stars = review.stars();
                            view! {
                                <div class="card review-card">
                                    <div class="card-header">
                                        <span class="stars">{stars}</span>
                                        <DeleteConfirmButton
                                            what="reseña"
                                            busy=Signal::derive(move || deleting.with(|d| d.as_deref() == Some(busy_id.as_str())))
                                            on_confirm=Callback::new(move |_| on_delete(id.clone()))
                                        />
                                    </div>
                                    <p>{review.comment}</p>
                                    <p class="meta">
                                        {format!("{} {} · usuario {}", review.target_type, review.target_id, review.author_id)}
                                    </p>
                                    <p class="meta">{format_date(&review.date)}</p>
                                </div>
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use serde_json::json;

    fn review(id: &str, rating: u8) -> serde_json::Value {
        json!({
            "_id": id,
            "comentario": "Muy bueno",
            "calificacion": rating,
            "type": "restaurante",
            "usuario_id": "u1",
            "reviewed_id": "r1",
            "fecha": "2026-09-30"
        })
    }

    fn reviews(values: Vec<serde_json::Value>) -> Vec<Review> {
        serde_json::from_value(serde_json::Value::Array(values)).unwrap()
    }

    #[test]
    fn test_remove_first_only_removes_one() {
        let mut rows = reviews(vec![review("a", 5), review("b", 3), review("b", 3)]);
        assert!(remove_first(&mut rows, "b"));
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(!remove_first(&mut rows, "zzz"));
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_sends_one_request_and_refreshes_in_current_order() {
        let mock = MockTransport::new();
        mock.ok(Method::GET, "/reseñas/ordenadas", json!([review("c", 5), review("a", 4), review("b", 2)]));
        mock.ok(Method::DELETE, "/resenas/a", json!({ "mensaje": "Reseña eliminada" }));

        let mut state = LoadState::default();
        state.finish(list_reviews(&mock, ReviewOrder::ByRating).await, LOAD_FAILED);

        let receipt = delete_review(&mock, "a").await.unwrap();
        if let Some(rows) = state.data_mut() {
            assert!(remove_first(rows, "a"));
        }
        let ids: Vec<String> = state.rows().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["c", "b"]);

        let done = receipt.refresh(|| list_reviews(&mock, ReviewOrder::ByRating)).await;
        assert_eq!(done.ack, "a");
        assert!(done.refreshed.is_ok());

        let deletes = mock.calls(&Method::DELETE, "/resenas/a");
        assert_eq!(deletes.len(), 1);
        assert_eq!(mock.count(&Method::GET, "/reseñas/ordenadas"), 2);
        assert_eq!(mock.count(&Method::GET, "/reseñas"), 0);
    }
}

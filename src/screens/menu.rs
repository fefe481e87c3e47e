//! Menu Screen
//!
//! Menu listing, lookup by name, and ingredient editing of the found item.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{change_ingredient, find_menu_item, list_menu, Ack, ApiResult, IngredientAction, Refreshed, Transport};
use crate::components::{alert, load_into, lookup_into, StatusMessage};
use crate::context::use_app_context;
use crate::forms::IngredientForm;
use crate::models::MenuItem;
use crate::state::LoadState;

const LOAD_FAILED: &str = "Error al cargar el menú";
const LOOKUP_FAILED: &str = "Error al buscar el item";

/// Item and listing reloads after an ingredient change; each can fail alone
#[derive(Debug, Clone, PartialEq)]
pub struct MenuRefresh {
    pub item: ApiResult<MenuItem>,
    pub listing: ApiResult<Vec<MenuItem>>,
}

/// Change one ingredient, then reload both the item and the listing
pub async fn submit_ingredient(
    api: &dyn Transport,
    item_name: &str,
    form: &IngredientForm,
) -> ApiResult<Refreshed<Ack, MenuRefresh>> {
    let change = form.validate()?;
    let receipt = change_ingredient(api, item_name, &change).await?;
    Ok(receipt
        .refresh(|| async {
            let item = find_menu_item(api, item_name).await;
            let listing = list_menu(api).await;
            Ok(MenuRefresh { item, listing })
        })
        .await)
}

fn price(value: f64) -> String {
    format!("Q{:.2}", value)
}

#[component]
fn MenuItemCard(item: MenuItem) -> impl IntoView {
    let ingredients = if item.ingredients.is_empty() {
        "Sin ingredientes".to_string()
    } else {
        item.ingredients.join(", ")
    };

    view! {
        <div class="card" class:unavailable=!item.available>
            <h3>{item.name}</h3>
            <p>{item.description}</p>
            <p>"Ingredientes: "{ingredients}</p>
            <p>"Precio: "{price(item.price)}</p>
            <p>"Categoría: "{item.category}</p>
            <p>{if item.available { "Disponible" } else { "No disponible" }}</p>
        </div>
    }
}

#[component]
pub fn MenuScreen() -> impl IntoView {
    let ctx = use_app_context();

    let menu = RwSignal::new(LoadState::<Vec<MenuItem>>::default());
    let found = RwSignal::new(LoadState::<MenuItem>::default());
    let search = RwSignal::new(String::new());
    let ingredient = RwSignal::new(IngredientForm::default());
    let (notice, set_notice) = signal(None::<String>);

    let api = ctx.transport();
    load_into(menu, LOAD_FAILED, async move { list_menu(&api).await });

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = ctx.transport();
        let name = search.get_untracked();
        set_notice.set(None);
        lookup_into(found, LOOKUP_FAILED, async move { find_menu_item(&api, &name).await });
    };

    let on_cancel = move |_| {
        found.set(LoadState::Idle);
        ingredient.set(IngredientForm::default());
        set_notice.set(None);
    };

    let on_change_ingredient = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(item_name) = found.with_untracked(|f| f.data().map(|item| item.name.clone())) else {
            return;
        };
        let form = ingredient.get_untracked();
        let api = ctx.transport();
        spawn_local(async move {
            match submit_ingredient(&api, &item_name, &form).await {
                Ok(done) => {
                    let message = done.ack.message.unwrap_or_else(|| {
                        format!("Ingrediente {} {}", form.ingredient.trim(), form.action.done_label())
                    });
                    set_notice.set(Some(message));
                    ingredient.update(|f| f.ingredient.clear());
                    match done.refreshed {
                        Ok(MenuRefresh { item, listing }) => {
                            found.update(|s| s.finish(item, LOOKUP_FAILED));
                            menu.update(|s| s.finish(listing, LOAD_FAILED));
                        }
                        Err(err) => {
                            tracing::warn!("menu refresh failed: {}", err);
                            menu.update(|s| s.fail(LOAD_FAILED));
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!("ingredient change failed: {}", err);
                    alert(&err.user_message("Error al modificar ingredientes"));
                }
            }
        });
    };

    view! {
        <div class="screen menu-screen">
            <h1>"Menú"</h1>

            <form class="filter-form" on:submit=on_search>
                <input
                    type="text"
                    placeholder="Nombre del item"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <button type="submit">"Buscar"</button>
            </form>

            <StatusMessage message=notice info=true />
            <StatusMessage message=Signal::derive(move || found.with(|s| s.error().map(str::to_string))) />

            {move || found.with(|s| s.data().cloned()).map(|item| view! {
                <div class="lookup-result">
                    <MenuItemCard item=item />
                    <form class="ingredient-form" on:submit=on_change_ingredient>
                        <select
                            prop:value=move || ingredient.with(|f| f.action.as_str())
                            on:change=move |ev| {
                                let action = IngredientAction::from_select_value(&event_target_value(&ev));
                                ingredient.update(|f| f.action = action);
                            }
                        >
                            <option value="agregar">"Agregar"</option>
                            <option value="quitar">"Quitar"</option>
                        </select>
                        <input
                            type="text"
                            placeholder="Ingrediente"
                            prop:value=move || ingredient.with(|f| f.ingredient.clone())
                            on:input=move |ev| ingredient.update(|f| f.ingredient = event_target_value(&ev))
                        />
                        <button type="submit">"Aplicar"</button>
                        <button type="button" on:click=on_cancel>"Cancelar"</button>
                    </form>
                </div>
            })}

            <Show when=move || menu.with(LoadState::is_loading)>
                <div class="loading">"Cargando..."</div>
            </Show>
            <StatusMessage message=Signal::derive(move || menu.with(|s| s.error().map(str::to_string))) />

            <div class="card-grid">
                <For
                    each=move || menu.with(LoadState::rows)
                    key=|item| item.id.clone()
                    children=move |item| view! { <MenuItemCard item=item /> }
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

    fn item(ingredients: &[&str]) -> serde_json::Value {
        json!({
            "_id": "m1",
            "nombre": "Pepián",
            "descripcion": "Guiso tradicional",
            "ingredientes": ingredients,
            "precio": 45.0,
            "disponible": true,
            "categoria": "Platos fuertes",
            "restaurante_id": "r1"
        })
    }

    #[tokio::test]
    async fn test_lookup_miss_is_reported() {
        let mock = MockTransport::new();
        mock.ok(Method::GET, "/menu/Tamal", json!({ "mensaje": "Item no encontrado" }));

        let mut found = LoadState::default();
        found.finish(find_menu_item(&mock, "Tamal").await, LOOKUP_FAILED);
        assert_eq!(found.error(), Some("Item no encontrado"));
        assert!(found.data().is_none());
    }

    #[tokio::test]
    async fn test_ingredient_change_refreshes_item_and_list() {
        let mock = MockTransport::new();
        mock.ok(Method::PUT, "/menu/ingredientes/Pepi%C3%A1n", json!({ "mensaje": "Ingrediente agregado" }));
        mock.ok(Method::GET, "/menu/Pepi%C3%A1n", item(&["pollo", "miltomate"]));
        mock.ok(Method::GET, "/menu", json!([item(&["pollo", "miltomate"])]));

        let form = IngredientForm {
            action: IngredientAction::Add,
            ingredient: " miltomate ".into(),
        };
        let done = submit_ingredient(&mock, "Pepián", &form).await.unwrap();
        let MenuRefresh { item, listing } = done.refreshed.unwrap();
        assert!(item.unwrap().ingredients.contains(&"miltomate".to_string()));
        assert_eq!(listing.unwrap().len(), 1);

        let put = &mock.calls(&Method::PUT, "/menu/ingredientes/Pepi%C3%A1n")[0];
        assert_eq!(put.body, Some(json!({ "accion": "agregar", "nombre": "miltomate" })));
    }

    #[tokio::test]
    async fn test_listing_reloads_even_when_item_refetch_fails() {
        let mock = MockTransport::new();
        mock.ok(Method::PUT, "/menu/ingredientes/Pepi%C3%A1n", json!({ "mensaje": "Ingrediente quitado" }));
        mock.respond(Method::GET, "/menu/Pepi%C3%A1n", Err(ApiError::Transport("offline".into())));
        mock.ok(Method::GET, "/menu", json!([item(&["pollo"])]));

        let form = IngredientForm {
            action: IngredientAction::Remove,
            ingredient: "miltomate".into(),
        };
        let done = submit_ingredient(&mock, "Pepián", &form).await.unwrap();
        let refresh = done.refreshed.unwrap();
        assert!(refresh.item.is_err());
        assert_eq!(refresh.listing.unwrap().len(), 1);
        assert_eq!(mock.count(&Method::GET, "/menu"), 1);
    }

    #[tokio::test]
    async fn test_missed_search_clears_previous_result() {
        let mock = MockTransport::new();
        mock.ok(Method::GET, "/menu/Pepi%C3%A1n", item(&["pollo"]));
        mock.ok(Method::GET, "/menu/Tamal", json!({ "mensaje": "Item del menú no encontrado" }));

        let mut found = LoadState::default();
        found.restart();
        found.finish(find_menu_item(&mock, "Pepián").await, LOOKUP_FAILED);
        assert_eq!(found.data().map(|i| i.name.as_str()), Some("Pepián"));

        found.restart();
        found.finish(find_menu_item(&mock, "Tamal").await, LOOKUP_FAILED);
        assert_eq!(found.error(), Some("Item del menú no encontrado"));
        assert!(found.data().is_none(), "ingredient form must not target the old dish");
    }

    #[tokio::test]
    async fn test_blank_ingredient_rejected() {
        let mock = MockTransport::new();
        let err = submit_ingredient(&mock, "Pepián", &IngredientForm::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(mock.requests().is_empty());
    }
}

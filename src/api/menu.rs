//! Menu Endpoints

use serde::Serialize;

use super::{decode, decode_found, segment, Ack, ApiError, ApiRequest, ApiResult, Mutated, Transport};
use crate::models::MenuItem;

/// Ingredient edit direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum IngredientAction {
    #[default]
    #[serde(rename = "agregar")]
    Add,
    #[serde(rename = "quitar")]
    Remove,
}

impl IngredientAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientAction::Add => "agregar",
            IngredientAction::Remove => "quitar",
        }
    }

    /// Parse an `<option value>`; anything unknown means add
    pub fn from_select_value(s: &str) -> Self {
        match s {
            "quitar" => IngredientAction::Remove,
            _ => IngredientAction::Add,
        }
    }

    /// Past participle for confirmation messages
    pub fn done_label(&self) -> &'static str {
        match self {
            IngredientAction::Add => "agregado",
            IngredientAction::Remove => "quitado",
        }
    }
}

/// Body of `PUT /menu/ingredientes/{name}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientChange {
    #[serde(rename = "accion")]
    pub action: IngredientAction,
    #[serde(rename = "nombre")]
    pub ingredient: String,
}

pub async fn list_menu(api: &dyn Transport) -> ApiResult<Vec<MenuItem>> {
    decode(api.send(ApiRequest::get("/menu")).await?)
}

/// Look a menu item up by its exact name
pub async fn find_menu_item(api: &dyn Transport, name: &str) -> ApiResult<MenuItem> {
    if name.trim().is_empty() {
        return Err(ApiError::validation("Ingresa el nombre del item."));
    }
    let path = format!("/menu/{}", segment(name));
    decode_found(api.send(ApiRequest::get(path)).await?)
}

pub async fn change_ingredient(
    api: &dyn Transport,
    item_name: &str,
    change: &IngredientChange,
) -> ApiResult<Mutated<Ack>> {
    if item_name.trim().is_empty() {
        return Err(ApiError::validation("Busca primero un item del menú."));
    }
    if change.ingredient.trim().is_empty() {
        return Err(ApiError::validation("Ingresa el nombre del ingrediente."));
    }

    let path = format!("/menu/ingredientes/{}", segment(item_name));
    let request = ApiRequest::put(path).json(change)?;
    let ack = Ack::from_value(api.send(request).await?);
    tracing::info!(item = item_name, action = change.action.as_str(), ingredient = %change.ingredient, "ingredient changed");
    Ok(Mutated(ack))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_change_ingredient_body() {
        let mock = MockTransport::new();
        mock.ok(Method::PUT, "/menu/ingredientes/Pepian%20de%20pollo", json!({ "mensaje": "ok" }));

        let change = IngredientChange {
            action: IngredientAction::Remove,
            ingredient: "cebolla".into(),
        };
        let _ = change_ingredient(&mock, "Pepian de pollo", &change).await.unwrap();

        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, Some(json!({ "accion": "quitar", "nombre": "cebolla" })));
    }

    #[tokio::test]
    async fn test_find_menu_item_miss() {
        let mock = MockTransport::new();
        mock.ok(Method::GET, "/menu/Nada", json!({ "mensaje": "Item del menú no encontrado" }));

        let err = find_menu_item(&mock, "Nada").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_action_round_trip_through_select_value() {
        assert_eq!(
            IngredientAction::from_select_value(IngredientAction::Remove.as_str()),
            IngredientAction::Remove
        );
        assert_eq!(IngredientAction::from_select_value("otra"), IngredientAction::Add);
    }
}

//! Order Endpoints

use serde::Serialize;

use super::{decode, decode_found, segment, Ack, ApiError, ApiRequest, ApiResult, Mutated, Transport};
use crate::models::{Order, OrderStatus};

/// One element of the `PUT /actualizarEstadosOrdenes` array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub id: String,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
}

pub async fn list_orders(api: &dyn Transport) -> ApiResult<Vec<Order>> {
    decode(api.send(ApiRequest::get("/ordenes")).await?)
}

/// Orders whose total is above `minimum`
pub async fn orders_above(api: &dyn Transport, minimum: f64) -> ApiResult<Vec<Order>> {
    if !minimum.is_finite() || minimum < 0.0 {
        return Err(ApiError::validation("Ingresa un monto mínimo válido."));
    }
    let request = ApiRequest::get("/ordenes/mayores").query("goal", minimum);
    decode(api.send(request).await?)
}

pub async fn get_order(api: &dyn Transport, id: &str) -> ApiResult<Order> {
    if id.trim().is_empty() {
        return Err(ApiError::validation("Ingresa el ID de la orden."));
    }
    let path = format!("/orden/{}", segment(id));
    decode_found(api.send(ApiRequest::get(path)).await?)
}

/// Change the status of every listed order in one request
pub async fn update_order_statuses(api: &dyn Transport, updates: &[StatusUpdate]) -> ApiResult<Mutated<Ack>> {
    if updates.is_empty() {
        return Err(ApiError::validation("Agrega al menos una orden a actualizar."));
    }
    let request = ApiRequest::put("/actualizarEstadosOrdenes").json(&updates)?;
    let ack = Ack::from_value(api.send(request).await?);
    tracing::info!(count = updates.len(), "order statuses updated");
    Ok(Mutated(ack))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_minimum_total_query() {
        let mock = MockTransport::new();
        mock.ok(Method::GET, "/ordenes/mayores", json!([]));

        orders_above(&mock, 250.5).await.unwrap();
        assert_eq!(mock.requests()[0].query_value("goal"), Some("250.5"));
    }

    #[tokio::test]
    async fn test_negative_minimum_rejected() {
        let mock = MockTransport::new();
        assert!(orders_above(&mock, -1.0).await.is_err());
        assert!(orders_above(&mock, f64::NAN).await.is_err());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_status_update_body() {
        let mock = MockTransport::new();
        mock.ok(Method::PUT, "/actualizarEstadosOrdenes", json!({ "mensaje": "2 órdenes actualizadas" }));

        let updates = vec![
            StatusUpdate { id: "o1".into(), status: OrderStatus::Delivered },
            StatusUpdate { id: "o2".into(), status: OrderStatus::Cancelled },
        ];
        let _ = update_order_statuses(&mock, &updates).await.unwrap();

        assert_eq!(
            mock.requests()[0].body,
            Some(json!([
                { "id": "o1", "estado": "Entregado" },
                { "id": "o2", "estado": "Cancelado" }
            ]))
        );
    }
}

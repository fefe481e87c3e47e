//! Aggregate Report Endpoints

use super::{decode_field, ApiRequest, ApiResult, Transport};
use crate::models::{MunicipalityCount, RestaurantRating, RestaurantSales};

pub async fn users_by_municipality(api: &dyn Transport) -> ApiResult<Vec<MunicipalityCount>> {
    let body = api.send(ApiRequest::get("/reportes/usuarios_por_municipio")).await?;
    decode_field(body, "usuarios_por_municipio")
}

pub async fn best_selling_dishes(api: &dyn Transport) -> ApiResult<Vec<RestaurantSales>> {
    let body = api.send(ApiRequest::get("/reportes/platos_mas_vendidos")).await?;
    decode_field(body, "platos_mas_vendidos")
}

pub async fn average_ratings(api: &dyn Transport) -> ApiResult<Vec<RestaurantRating>> {
    let body = api
        .send(ApiRequest::get("/reportes/calificaciones_promedio_restaurantes"))
        .await?;
    decode_field(body, "calificaciones_promedio_restaurantes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_best_selling_dishes() {
        let mock = MockTransport::new();
        mock.ok(
            Method::GET,
            "/reportes/platos_mas_vendidos",
            json!({
                "platos_mas_vendidos": [{
                    "restaurante_nombre": "Casa",
                    "platos_vendidos": [{ "plato": "Pepian", "cantidad": 12, "precio": 55.0 }]
                }]
            }),
        );

        let rows = best_selling_dishes(&mock).await.unwrap();
        assert_eq!(rows[0].restaurant, "Casa");
        assert_eq!(rows[0].dishes[0].quantity, 12);
    }
}

//! Restaurant Endpoints

use serde::Serialize;

use super::{decode, decode_field, Ack, ApiError, ApiRequest, ApiResult, Mutated, Transport};
use crate::models::{CityCount, Location, Restaurant};

/// Rows per list page
pub const PAGE_SIZE: u32 = 10;

// ========================
// Query Parameters
// ========================

/// `skip`/`limit` window over the restaurant collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: PAGE_SIZE,
        }
    }
}

impl Page {
    pub fn next(self) -> Self {
        Self {
            skip: self.skip + self.limit,
            ..self
        }
    }

    pub fn previous(self) -> Self {
        Self {
            skip: self.skip.saturating_sub(self.limit),
            ..self
        }
    }

    pub fn is_first(&self) -> bool {
        self.skip == 0
    }

    /// 1-based page number
    pub fn number(&self) -> u32 {
        self.skip / self.limit.max(1) + 1
    }
}

/// City and/or category criteria; blank input means "not set"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantFilter {
    pub city: Option<String>,
    pub category: Option<String>,
}

impl RestaurantFilter {
    pub fn new(city: &str, category: &str) -> Self {
        Self {
            city: non_blank(city),
            category: non_blank(category),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.category.is_none()
    }

    fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(city) = &self.city {
            request = request.query("ciudad", city);
        }
        if let Some(category) = &self.category {
            request = request.query("categoria", category);
        }
        request
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// ========================
// Request Bodies
// ========================

/// One element of the `POST /restaurantes/bulk` array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRestaurant {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "departamento")]
    pub department: String,
    #[serde(rename = "horario")]
    pub hours: String,
    #[serde(rename = "calificacion_promedio")]
    pub average_rating: f64,
    #[serde(rename = "ubicacion")]
    pub location: Location,
}

// ========================
// Calls
// ========================

pub async fn list_restaurants(api: &dyn Transport, page: Page) -> ApiResult<Vec<Restaurant>> {
    let request = ApiRequest::get("/restaurantes")
        .query("skip", page.skip)
        .query("limit", page.limit);
    decode(api.send(request).await?)
}

/// Filter by city and/or category.
///
/// A filter without criteria is rejected here, before any request.
pub async fn filter_restaurants(api: &dyn Transport, filter: &RestaurantFilter) -> ApiResult<Vec<Restaurant>> {
    if filter.is_empty() {
        return Err(ApiError::validation(
            "Debes ingresar al menos una ciudad o categoría para filtrar.",
        ));
    }
    let request = filter.apply(ApiRequest::get("/restaurantes/filtro"));
    decode(api.send(request).await?)
}

pub async fn restaurants_by_city(api: &dyn Transport) -> ApiResult<Vec<CityCount>> {
    let body = api.send(ApiRequest::get("/restaurantes/por-ciudad")).await?;
    decode_field(body, "restaurantes_por_ciudad")
}

/// Create one or many restaurants in a single call
pub async fn create_restaurants(api: &dyn Transport, restaurants: &[NewRestaurant]) -> ApiResult<Mutated<Ack>> {
    if restaurants.is_empty() {
        return Err(ApiError::validation("Agrega al menos un restaurante."));
    }
    let request = ApiRequest::post("/restaurantes/bulk").json(&restaurants)?;
    let ack = Ack::from_value(api.send(request).await?);
    tracing::info!(count = restaurants.len(), "restaurants created");
    Ok(Mutated(ack))
}

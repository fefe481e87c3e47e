//! Frontend Models
//!
//! Records exchanged verbatim with the backend. Field names on the wire are
//! the backend's; Rust names are renamed through serde.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "latitud")]
    pub latitude: f64,
    #[serde(rename = "longitud")]
    pub longitude: f64,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Postal address of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Branch / street name
    #[serde(rename = "nombre")]
    pub branch: String,
    #[serde(rename = "municipio")]
    pub municipality: String,
    #[serde(rename = "ubicacion")]
    pub location: Location,
}

/// User data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "direccion")]
    pub address: Address,
    #[serde(rename = "fecha_registro")]
    pub registered_at: String,
}

/// Name + email only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProjection {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
}

/// Restaurant data structure.
///
/// Stored documents are not uniform, so every descriptive field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(rename = "ciudad", default)]
    pub city: Option<String>,
    #[serde(rename = "departamento", default)]
    pub department: Option<String>,
    #[serde(rename = "horario", default)]
    pub hours: Option<String>,
    #[serde(rename = "calificacion_promedio", default)]
    pub average_rating: Option<f64>,
    #[serde(rename = "ubicacion", default)]
    pub location: Option<Location>,
}

/// Order lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "Preparando")]
    Preparing,
    #[serde(rename = "Entregado")]
    Delivered,
    #[serde(rename = "Cancelado")]
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Cancelled,
        OrderStatus::Delivered,
        OrderStatus::Pending,
        OrderStatus::Preparing,
    ];

    /// Wire value, also used as the `<option>` value
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendiente",
            OrderStatus::Preparing => "Preparando",
            OrderStatus::Delivered => "Entregado",
            OrderStatus::Cancelled => "Cancelado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precio_unitario")]
    pub unit_price: f64,
    #[serde(rename = "descuento", default)]
    pub discount: f64,
}

/// Order data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "usuario_id", default)]
    pub user_id: String,
    #[serde(rename = "restaurante_id", default)]
    pub restaurant_id: String,
    #[serde(rename = "fecha", default)]
    pub date: String,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
    pub total: f64,
    #[serde(default)]
    pub items: Vec<OrderLine>,
}

/// Review data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "comentario", default)]
    pub comment: String,
    #[serde(rename = "calificacion")]
    pub rating: u8,
    /// What was reviewed ("restaurante", "orden", ...)
    #[serde(rename = "type", default)]
    pub target_type: String,
    #[serde(rename = "usuario_id", default)]
    pub author_id: String,
    #[serde(rename = "reviewed_id", default)]
    pub target_id: String,
    #[serde(rename = "fecha", default)]
    pub date: String,
}

impl Review {
    /// One star per rating point, clamped to 1-5
    pub fn stars(&self) -> String {
        "⭐".repeat(self.rating.clamp(1, 5) as usize)
    }
}

/// Menu item data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "ingredientes", default)]
    pub ingredients: Vec<String>,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "disponible")]
    pub available: bool,
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(rename = "restaurante_id", default)]
    pub restaurant_id: String,
}

// ========================
// Aggregates
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCount {
    #[serde(rename = "_id")]
    pub city: String,
    #[serde(rename = "total_restaurantes")]
    pub restaurants: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MunicipalityCount {
    #[serde(rename = "_id")]
    pub municipality: String,
    #[serde(rename = "total_usuarios")]
    pub users: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishSales {
    #[serde(rename = "plato")]
    pub dish: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precio")]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantSales {
    #[serde(rename = "restaurante_nombre")]
    pub restaurant: String,
    #[serde(rename = "platos_vendidos", default)]
    pub dishes: Vec<DishSales>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRating {
    #[serde(rename = "restaurante_nombre")]
    pub restaurant: String,
    #[serde(rename = "calificacion_promedio")]
    pub average: f64,
    #[serde(rename = "total_reseñas")]
    pub reviews: u32,
}

// ========================
// Display helpers
// ========================

/// `Some(non-empty)` or the placeholder
pub fn or_unknown(value: Option<&str>, placeholder: &'static str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Render a backend timestamp ("2024-05-01", "2024-05-01T13:45:00", RFC 3339)
pub fn format_date(raw: &str) -> String {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

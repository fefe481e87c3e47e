//! Form Input
//!
//! Raw text typed into the screens, and its validation into the typed
//! request bodies the API layer sends. Nothing is serialized until a form
//! validates.

use chrono::NaiveDate;

use crate::api::{
    AddressPatch, ApiError, ApiResult, IngredientAction, IngredientChange, NewRestaurant, NewUser,
    StatusUpdate, UserPatch,
};
use crate::models::{Address, Location, OrderStatus};

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn required(value: &str, message: &str) -> ApiResult<String> {
    optional(value).ok_or_else(|| ApiError::validation(message))
}

/// Parse a decimal typed by the user; NaN and infinities are rejected
pub fn parse_number(raw: &str, label: &str) -> ApiResult<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ApiError::validation(format!("{} debe ser un número.", label)))
}

fn parse_location(latitude: &str, longitude: &str) -> ApiResult<Location> {
    let latitude = parse_number(latitude, "La latitud")?;
    let longitude = parse_number(longitude, "La longitud")?;
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ApiError::validation("La latitud debe estar entre -90 y 90."));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ApiError::validation("La longitud debe estar entre -180 y 180."));
    }
    Ok(Location { latitude, longitude })
}

// ========================
// Login / Registration
// ========================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub phone: String,
}

impl LoginForm {
    /// `(email, phone)` trimmed and required
    pub fn credentials(&self) -> ApiResult<(String, String)> {
        Ok((
            required(&self.email, "Ingresa tu correo.")?,
            required(&self.phone, "Ingresa tu teléfono.")?,
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub municipality: String,
    pub branch: String,
    pub latitude: String,
    pub longitude: String,
}

impl RegistrationForm {
    pub fn validate(&self, today: NaiveDate) -> ApiResult<NewUser> {
        let email = required(&self.email, "Ingresa tu correo.")?;
        let phone = required(&self.phone, "Ingresa tu teléfono.")?;
        let location = parse_location(&self.latitude, &self.longitude)?;

        Ok(NewUser {
            name: trimmed(&self.name),
            email,
            phone,
            registered_at: today.format("%Y-%m-%d").to_string(),
            address: Address {
                branch: trimmed(&self.branch),
                municipality: trimmed(&self.municipality),
                location,
            },
        })
    }
}

// ========================
// Users
// ========================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdateForm {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub municipality: String,
}

impl UserUpdateForm {
    /// `(email, patch)`; blank optional fields are left out of the patch
    pub fn validate(&self) -> ApiResult<(String, UserPatch)> {
        let email = required(&self.email, "Ingresa el correo del usuario a actualizar.")?;
        let patch = UserPatch {
            name: optional(&self.name),
            phone: optional(&self.phone),
            address: optional(&self.municipality).map(|municipality| AddressPatch { municipality }),
        };
        if patch.is_empty() {
            return Err(ApiError::validation("Ingresa al menos un dato para actualizar."));
        }
        Ok((email, patch))
    }

    /// Keep the email so the same user can be edited again
    pub fn clear_changes(&mut self) {
        self.name.clear();
        self.phone.clear();
        self.municipality.clear();
    }
}

// ========================
// Restaurants
// ========================

/// One row of the bulk creation form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantRow {
    pub name: String,
    pub category: String,
    pub city: String,
    pub department: String,
    pub hours: String,
    pub rating: String,
    pub latitude: String,
    pub longitude: String,
}

/// Editable field of a [`RestaurantRow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestaurantField {
    Name,
    Category,
    City,
    Department,
    Hours,
    Rating,
    Latitude,
    Longitude,
}

impl RestaurantField {
    pub const ALL: [RestaurantField; 8] = [
        RestaurantField::Name,
        RestaurantField::Category,
        RestaurantField::City,
        RestaurantField::Department,
        RestaurantField::Hours,
        RestaurantField::Rating,
        RestaurantField::Latitude,
        RestaurantField::Longitude,
    ];

    pub fn placeholder(&self) -> &'static str {
        match self {
            RestaurantField::Name => "Nombre",
            RestaurantField::Category => "Categoría",
            RestaurantField::City => "Ciudad",
            RestaurantField::Department => "Departamento",
            RestaurantField::Hours => "Horario (9:00-21:00)",
            RestaurantField::Rating => "Calificación (0-5)",
            RestaurantField::Latitude => "Latitud",
            RestaurantField::Longitude => "Longitud",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            RestaurantField::Rating | RestaurantField::Latitude | RestaurantField::Longitude
        )
    }
}

impl RestaurantRow {
    pub fn get(&self, field: RestaurantField) -> &str {
        match field {
            RestaurantField::Name => &self.name,
            RestaurantField::Category => &self.category,
            RestaurantField::City => &self.city,
            RestaurantField::Department => &self.department,
            RestaurantField::Hours => &self.hours,
            RestaurantField::Rating => &self.rating,
            RestaurantField::Latitude => &self.latitude,
            RestaurantField::Longitude => &self.longitude,
        }
    }

    pub fn set(&mut self, field: RestaurantField, value: String) {
        let slot = match field {
            RestaurantField::Name => &mut self.name,
            RestaurantField::Category => &mut self.category,
            RestaurantField::City => &mut self.city,
            RestaurantField::Department => &mut self.department,
            RestaurantField::Hours => &mut self.hours,
            RestaurantField::Rating => &mut self.rating,
            RestaurantField::Latitude => &mut self.latitude,
            RestaurantField::Longitude => &mut self.longitude,
        };
        *slot = value;
    }

    pub fn validate(&self) -> ApiResult<NewRestaurant> {
        let name = required(&self.name, "El nombre es obligatorio.")?;
        let average_rating = parse_number(&self.rating, "La calificación")?;
        if !(0.0..=5.0).contains(&average_rating) {
            return Err(ApiError::validation("La calificación debe estar entre 0 y 5."));
        }
        let location = parse_location(&self.latitude, &self.longitude)?;

        Ok(NewRestaurant {
            name,
            category: trimmed(&self.category),
            city: trimmed(&self.city),
            department: trimmed(&self.department),
            hours: trimmed(&self.hours),
            average_rating,
            location,
        })
    }
}

/// Validate every row; the first failure names its row (1-based)
pub fn validate_restaurant_rows(rows: &[RestaurantRow]) -> ApiResult<Vec<NewRestaurant>> {
    if rows.is_empty() {
        return Err(ApiError::validation("Agrega al menos un restaurante."));
    }
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            row.validate().map_err(|e| match e {
                ApiError::Validation(msg) => ApiError::Validation(format!("Fila {}: {}", i + 1, msg)),
                other => other,
            })
        })
        .collect()
}

// ========================
// Orders
// ========================

/// One row of the status update form; `status` holds the `<select>` value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusRow {
    pub id: String,
    pub status: String,
}

impl StatusRow {
    fn is_blank(&self) -> bool {
        self.id.trim().is_empty() && self.status.trim().is_empty()
    }
}

/// Blank rows are skipped; half-filled rows are an error
pub fn collect_status_updates(rows: &[StatusRow]) -> ApiResult<Vec<StatusUpdate>> {
    let mut updates = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        if row.is_blank() {
            continue;
        }
        let id = required(&row.id, &format!("Fila {}: falta el ID de la orden.", i + 1))?;
        let status = OrderStatus::parse(row.status.trim())
            .ok_or_else(|| ApiError::validation(format!("Fila {}: selecciona un estado.", i + 1)))?;
        updates.push(StatusUpdate { id, status });
    }
    if updates.is_empty() {
        return Err(ApiError::validation("Agrega al menos una orden a actualizar."));
    }
    Ok(updates)
}

/// Minimum order total typed by the user
pub fn parse_minimum_total(raw: &str) -> ApiResult<f64> {
    let minimum = parse_number(raw, "El monto mínimo")?;
    if minimum < 0.0 {
        return Err(ApiError::validation("El monto mínimo no puede ser negativo."));
    }
    Ok(minimum)
}

// ========================
// Menu
// ========================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientForm {
    pub action: IngredientAction,
    pub ingredient: String,
}

impl IngredientForm {
    pub fn validate(&self) -> ApiResult<IngredientChange> {
        Ok(IngredientChange {
            action: self.action,
            ingredient: required(&self.ingredient, "Ingresa el nombre del ingrediente.")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_registration_nests_numeric_coordinates() {
        let form = RegistrationForm {
            email: "a@b.com".into(),
            phone: "123".into(),
            latitude: "14.6".into(),
            longitude: "-90.5".into(),
            ..RegistrationForm::default()
        };

        let body = serde_json::to_value(form.validate(today()).unwrap()).unwrap();
        assert_eq!(body["correo"], json!("a@b.com"));
        assert_eq!(body["telefono"], json!("123"));
        assert_eq!(body["fecha_registro"], json!("2026-10-18"));
        assert_eq!(body["direccion"]["ubicacion"]["latitud"], json!(14.6));
        assert_eq!(body["direccion"]["ubicacion"]["longitud"], json!(-90.5));
    }

    #[test]
    fn test_registration_rejects_bad_coordinates() {
        let form = RegistrationForm {
            email: "a@b.com".into(),
            phone: "123".into(),
            latitude: "NaN".into(),
            longitude: "-90.5".into(),
            ..RegistrationForm::default()
        };
        assert_eq!(
            form.validate(today()).unwrap_err(),
            ApiError::Validation("La latitud debe ser un número.".into())
        );

        let form = RegistrationForm { latitude: "95".into(), ..form };
        assert!(form.validate(today()).is_err());
    }

    #[test]
    fn test_user_update_form() {
        let mut form = UserUpdateForm {
            email: " ana@x.com ".into(),
            name: "".into(),
            phone: "  ".into(),
            municipality: "Mixco".into(),
        };
        let (email, patch) = form.validate().unwrap();
        assert_eq!(email, "ana@x.com");
        assert_eq!(patch.name, None);
        assert_eq!(patch.address, Some(AddressPatch { municipality: "Mixco".into() }));

        form.clear_changes();
        assert_eq!(form.email, " ana@x.com ");
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_restaurant_rows_report_row_number() {
        let good = RestaurantRow {
            name: "Casa".into(),
            rating: "4,5".into(),
            latitude: "14.6".into(),
            longitude: "-90.5".into(),
            ..RestaurantRow::default()
        };
        let bad = RestaurantRow { rating: "seis".into(), ..good.clone() };

        let created = validate_restaurant_rows(&[good.clone()]).unwrap();
        assert_eq!(created[0].average_rating, 4.5);

        let err = validate_restaurant_rows(&[good, bad]).unwrap_err();
        assert_eq!(err, ApiError::Validation("Fila 2: La calificación debe ser un número.".into()));
    }

    #[test]
    fn test_restaurant_row_field_access() {
        let mut row = RestaurantRow::default();
        for field in RestaurantField::ALL {
            row.set(field, field.placeholder().to_string());
        }
        assert_eq!(row.get(RestaurantField::City), "Ciudad");
        assert_eq!(row.get(RestaurantField::Longitude), "Longitud");
    }

    #[test]
    fn test_status_rows() {
        let rows = vec![
            StatusRow { id: "o1".into(), status: "Entregado".into() },
            StatusRow::default(),
            StatusRow { id: "o2".into(), status: "Pendiente".into() },
        ];
        let updates = collect_status_updates(&rows).unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[1].status, OrderStatus::Pending);

        let half = vec![StatusRow { id: "o3".into(), status: String::new() }];
        assert_eq!(
            collect_status_updates(&half).unwrap_err(),
            ApiError::Validation("Fila 1: selecciona un estado.".into())
        );
        assert!(collect_status_updates(&[StatusRow::default()]).is_err());
    }

    #[test]
    fn test_minimum_total() {
        assert_eq!(parse_minimum_total(" 100 ").unwrap(), 100.0);
        assert!(parse_minimum_total("-5").is_err());
        assert!(parse_minimum_total("").is_err());
        assert!(parse_minimum_total("inf").is_err());
    }
}

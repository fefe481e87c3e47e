//! User Endpoints

use serde::Serialize;

use super::{decode, decode_found, segment, Ack, ApiError, ApiRequest, ApiResult, Mutated, Transport};
use crate::models::{Address, User, UserProjection};

// ========================
// Request Bodies
// ========================

/// Body of `POST /nuevoUsuario`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    /// `YYYY-MM-DD`
    #[serde(rename = "fecha_registro")]
    pub registered_at: String,
    #[serde(rename = "direccion")]
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressPatch {
    #[serde(rename = "municipio")]
    pub municipality: String,
}

/// Body of `PUT /actualizarUsuario/{email}`; unset fields are left out
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserPatch {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressPatch>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.address.is_none()
    }
}

// ========================
// Calls
// ========================

pub async fn list_users(api: &dyn Transport) -> ApiResult<Vec<User>> {
    decode(api.send(ApiRequest::get("/usuarios")).await?)
}

pub async fn list_user_projections(api: &dyn Transport) -> ApiResult<Vec<UserProjection>> {
    decode(api.send(ApiRequest::get("/usuarios/proyeccion")).await?)
}

/// Look a user up by email
pub async fn get_user(api: &dyn Transport, email: &str) -> ApiResult<User> {
    let path = format!("/usuario/{}", segment(email));
    decode_found(api.send(ApiRequest::get(path)).await?)
}

pub async fn create_user(api: &dyn Transport, user: &NewUser) -> ApiResult<Mutated<Ack>> {
    let request = ApiRequest::post("/nuevoUsuario").json(user)?;
    let ack = Ack::from_value(api.send(request).await?);
    tracing::info!(email = %user.email, id = ?ack.id, "user created");
    Ok(Mutated(ack))
}

pub async fn update_user(api: &dyn Transport, email: &str, patch: &UserPatch) -> ApiResult<Mutated<Ack>> {
    if email.trim().is_empty() {
        return Err(ApiError::validation("Ingresa el correo del usuario a actualizar."));
    }
    if patch.is_empty() {
        return Err(ApiError::validation("Ingresa al menos un dato para actualizar."));
    }

    let path = format!("/actualizarUsuario/{}", segment(email));
    let request = ApiRequest::put(path).json(patch)?;
    let ack = Ack::from_value(api.send(request).await?);
    tracing::info!(%email, "user updated");
    Ok(Mutated(ack))
}

//! API Errors
//!
//! Single error type for every call the frontend makes.

use thiserror::Error;

/// Common result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No response at all (network down, CORS, DNS)
    #[error("transport error: {0}")]
    Transport(String),

    /// 404, or a lookup answered with a bare `mensaje`
    #[error("not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Body did not match the expected schema
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Rejected before any request was sent
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// Text suitable for an on-screen message.
    ///
    /// Validation and not-found messages come from the user's input or the
    /// backend and are shown verbatim; everything else falls back to
    /// `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(msg) | ApiError::NotFound(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_backend_text() {
        let err = ApiError::NotFound("Orden no encontrada".into());
        assert_eq!(err.user_message("Error"), "Orden no encontrada");

        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.user_message("Error al obtener órdenes"), "Error al obtener órdenes");
    }

    #[test]
    fn test_display() {
        let err = ApiError::Status { status: 500, message: "boom".into() };
        assert_eq!(err.to_string(), "HTTP 500: boom");
        assert_eq!(ApiError::validation("Falta el correo").to_string(), "Falta el correo");
    }
}

//! Review Endpoints

use super::{decode, segment, ApiError, ApiRequest, ApiResult, Mutated, Transport};
use crate::models::Review;

/// Which listing the reviews screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewOrder {
    #[default]
    Default,
    ByRating,
}

impl ReviewOrder {
    pub fn path(&self) -> &'static str {
        match self {
            ReviewOrder::Default => "/reseñas",
            ReviewOrder::ByRating => "/reseñas/ordenadas",
        }
    }
}

pub async fn list_reviews(api: &dyn Transport, order: ReviewOrder) -> ApiResult<Vec<Review>> {
    decode(api.send(ApiRequest::get(order.path())).await?)
}

/// Delete one review; the receipt carries the deleted id
pub async fn delete_review(api: &dyn Transport, id: &str) -> ApiResult<Mutated<String>> {
    if id.trim().is_empty() {
        return Err(ApiError::validation("Reseña sin identificador."));
    }
    let path = format!("/resenas/{}", segment(id));
    api.send(ApiRequest::delete(path)).await?;
    tracing::info!(%id, "review deleted");
    Ok(Mutated(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_sorted_listing_path() {
        let mock = MockTransport::new();
        mock.ok(Method::GET, "/reseñas/ordenadas", json!([]));

        list_reviews(&mock, ReviewOrder::ByRating).await.unwrap();
        assert_eq!(mock.count(&Method::GET, "/reseñas/ordenadas"), 1);
    }

    #[tokio::test]
    async fn test_delete_uses_id_segment() {
        let mock = MockTransport::new();
        mock.ok(Method::DELETE, "/resenas/abc123", json!({ "mensaje": "Reseña eliminada" }));

        let deleted = delete_review(&mock, "abc123").await.unwrap().into_inner();
        assert_eq!(deleted, "abc123");
        assert_eq!(mock.count(&Method::DELETE, "/resenas/abc123"), 1);
    }
}

//! Error types for billed-api

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use billed_core::CoreError;
use thiserror::Error;

use crate::views;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("{message}")]
    BadRequest { message: String },

    /// The bill store rejected or failed the call
    #[error("{message}")]
    Upstream { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// JSON body for the `/api` endpoints
    pub fn into_json(self) -> Response {
        (
            self.status(),
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::BillNotFound { id } => ApiError::NotFound { resource: format!("bill {}", id) },
            CoreError::Store(e) => ApiError::Upstream { message: e.to_string() },
            e @ (CoreError::InvalidFormat { .. } | CoreError::ValidationError { .. }) => {
                ApiError::BadRequest { message: e.to_string() }
            }
        }
    }
}

/// Error page fragment, for HTMX swaps
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Html(views::error_page(&self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billed_core::StoreError;

    #[test]
    fn test_from_core_error() {
        let error = ApiError::from(CoreError::from(StoreError::Status { status: 500 }));
        assert_eq!(error.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(error.to_string(), "Erreur 500");

        let error = ApiError::from(CoreError::BillNotFound { id: "x".to_string() });
        assert_eq!(error.status(), StatusCode::NOT_FOUND);

        let error = ApiError::from(CoreError::ValidationError { message: "date invalide".to_string() });
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert!(error.to_string().contains("date invalide"));
    }

    #[tokio::test]
    async fn test_into_response_renders_error_page() {
        let response = ApiError::Upstream { message: "Erreur 401".to_string() }.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("data-testid='error-message'"));
        assert!(html.contains("Erreur 401"));
    }

    #[tokio::test]
    async fn test_into_json() {
        let response = ApiError::NotFound { resource: "bill x".to_string() }.into_json();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Not found: bill x");
    }
}

//! API error handling.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// API error type.
///
/// `Internal` keeps the failing step for logs and tests; clients only ever
/// see a generic message.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Internal(String),
}

impl ApiError {
    /// Log a failure of a load-bearing step and turn it into a 500.
    pub fn server_error(context: &str, err: impl std::fmt::Display) -> Self {
        tracing::error!("{}: {}", context, err);
        ApiError::Internal(context.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_internal_error_body_is_generic() {
        let err = ApiError::server_error(
            "SearchRepository",
            "database error: relation \"repositories\" does not exist",
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"internal server error"}"#);
    }
}

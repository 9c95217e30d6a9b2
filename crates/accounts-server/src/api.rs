//! Service-level handlers and the API error type.

use accounts_store::AccountError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::MethodNotAllowed(msg) => (StatusCode::METHOD_NOT_ALLOWED, msg),
            ApiError::UnsupportedMediaType(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg),
            ApiError::InternalServerError(msg) => {
                // Details stay in the log; clients get a generic message.
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::Validation(msg) => ApiError::BadRequest(msg),
            AccountError::NotFound(id) => {
                ApiError::NotFound(format!("account with id '{id}' was not found"))
            }
            AccountError::Database(err) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedMediaType(
                "Content-Type must be application/json".to_string(),
            ),
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

/// An id segment that is not an integer names no account.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "unparseable path");
        ApiError::NotFound("no account at this path".to_string())
    }
}

/// Handler for `GET /`.
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "name": "Account REST API Service",
        "version": env!("CARGO_PKG_VERSION"),
        "paths": "/accounts"
    }))
}

/// Health check handler.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// Fallback for paths with no route.
pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound("no such route".to_string())
}

/// Fallback for a known path requested with an unsupported method.
pub async fn method_not_allowed_handler(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(format!("{method} is not supported on this path"))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_maps_to_bad_request() {
        let err = ApiError::from(AccountError::Validation("missing field: email".into()));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "missing field: email");
    }

    #[tokio::test]
    async fn not_found_names_the_account() {
        let response = ApiError::from(AccountError::NotFound(7)).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await["error"],
            "account with id '7' was not found"
        );
    }

    #[tokio::test]
    async fn method_not_allowed_names_the_method() {
        let response = method_not_allowed_handler(Method::DELETE).await.into_response();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_json(response).await["error"],
            "DELETE is not supported on this path"
        );
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let err = ApiError::InternalServerError("disk I/O error".to_string());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "internal server error");
    }
}

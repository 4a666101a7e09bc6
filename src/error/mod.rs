use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed input, rejected before any network access.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The target page could not be fetched.
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, String) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Fetch(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal => {
                tracing::error!("Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Flatten `validator` errors into one user-facing sentence.
pub fn validation_error(errors: validator::ValidationErrors) -> AppError {
    let messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|v| v.iter())
        .map(|e| match &e.message {
            Some(m) => m.to_string(),
            None => e.code.to_string(),
        })
        .collect();

    if messages.is_empty() {
        AppError::Validation(errors.to_string())
    } else {
        AppError::Validation(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;

    async fn body_json(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_returns_400() {
        let response = AppError::Validation("invalid input".into()).into_response();
        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fetch_error_returns_502() {
        let response = AppError::Fetch("Failed to fetch URL".into()).into_response();
        assert_eq!(response.status(), axum::http::StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn internal_error_returns_500() {
        let response = AppError::Internal.into_response();
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn validation_error_body_has_error_key() {
        let response = AppError::Validation("invalid input".into()).into_response();
        let json = body_json(response.into_body()).await;
        assert_eq!(json["error"], "invalid input");
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let response = AppError::Internal.into_response();
        let json = body_json(response.into_body()).await;
        assert_eq!(json["error"], "Internal server error");
    }
}

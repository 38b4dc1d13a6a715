//! 🚨 요청 처리 중 발생하는 에러와 HTTP 응답 변환

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
    // 본문이 JSON 이 아니거나 필드가 빠진 경우
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    // 경로의 식별자가 UUID 형식이 아닌 경우
    #[error(transparent)]
    PathRejection(#[from] PathRejection),

    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),

    #[error("user {0} not found")]
    NotFound(Uuid),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::JsonRejection(JsonRejection::MissingJsonContentType(rejection)) => {
                (rejection.status(), rejection.body_text())
            }
            AppError::JsonRejection(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            AppError::PathRejection(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            AppError::Validation(_) => {
                let message = format!("Input validation error: [{self}]").replace('\n', ", ");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
        };

        tracing::debug!(%status, %message, "request failed");

        (status, Json(json!({ "error": message }))).into_response()
    }
}

//! 🚨 에러 종류별로 서로 다른 HTTP 상태 코드를 돌려줌
//!
//! | 에러 | 상태 코드 |
//! |---|---|
//! | 본문 누락/형식 오류, 검증 실패 | 400 |
//! | 로그인 시 비밀번호 불일치 | 401 |
//! | 로그인 시 email 없음 | 404 |
//! | 이미 가입된 email | 409 |
//! | 지원하지 않는 Content-Type | 415 |
//! | DB, 해시, 작업 스레드 오류 | 500 (내용은 로그에만 남김) |

use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tokio::task::JoinError;

use crate::{model::HashError, store::StoreError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    #[error(transparent)]
    FormRejection(#[from] FormRejection),

    #[error("expected an application/json or application/x-www-form-urlencoded body")]
    UnsupportedMediaType,

    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),

    #[error("user not found")]
    NotFound,

    #[error("wrong credentials")]
    Unauthorized,

    #[error("email {0} is already registered")]
    Conflict(String),

    #[error(transparent)]
    Store(StoreError),

    #[error("password hashing failed: {0}")]
    Hash(#[from] HashError),

    #[error(transparent)]
    Task(#[from] JoinError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => Self::Conflict(email),
            err => Self::Store(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Content-Type 이 JSON/Form 이 아니면 axum 이 정한 상태(415) 그대로
            AppError::JsonRejection(JsonRejection::MissingJsonContentType(rejection)) => {
                (rejection.status(), rejection.body_text())
            }
            AppError::FormRejection(FormRejection::InvalidFormContentType(rejection)) => {
                (rejection.status(), rejection.body_text())
            }
            // 나머지 본문 오류(문법, 필드 누락)는 전부 400
            AppError::JsonRejection(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            AppError::FormRejection(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            AppError::UnsupportedMediaType => (StatusCode::UNSUPPORTED_MEDIA_TYPE, self.to_string()),
            AppError::Validation(_) => {
                let message = format!("Input validation error: [{self}]").replace('\n', ", ");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Conflict(_) => (StatusCode::CONFLICT, self.to_string()),
            AppError::Store(_) | AppError::Hash(_) | AppError::Task(_) => {
                // 서버 내부 오류는 클라이언트에 자세히 노출하지 않음
                tracing::error!(err = %self, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

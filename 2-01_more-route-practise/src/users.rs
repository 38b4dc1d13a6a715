//! 🧍 `/api/v1/users` 라우터와 핸들러
//!
//! - `GET    /`              → 전체 유저 목록
//! - `POST   /`              → 유저 추가 (`{"user": {"name": "..."}}`)
//! - `GET    /{identifier}`  → 유저 한 명 조회
//! - `DELETE /{identifier}`  → 유저 삭제

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    http::{request::Parts, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    store::{User, UserStore},
};

pub fn router() -> Router<UserStore> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{identifier}", get(show_user).delete(delete_user))
}

/// 응답 본문은 항상 `{"data": ...}` 모양
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "Can not be empty"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(nested)]
    pub user: NewUser,
}

// GET /api/v1/users
async fn list_users(State(store): State<UserStore>) -> Json<Data<Vec<User>>> {
    Json(Data {
        data: store.list().await,
    })
}

// POST /api/v1/users
async fn create_user(
    State(store): State<UserStore>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> (StatusCode, Json<Data<Vec<User>>>) {
    let user = store.insert(input.user.name).await;
    tracing::debug!(id = %user.id, "user created");

    (StatusCode::CREATED, Json(Data { data: vec![user] }))
}

// GET /api/v1/users/{identifier}
async fn show_user(
    State(store): State<UserStore>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Data<Vec<User>>>, AppError> {
    let user = store.get(id).await.ok_or(AppError::NotFound(id))?;

    Ok(Json(Data { data: vec![user] }))
}

// DELETE /api/v1/users/{identifier}
async fn delete_user(
    State(store): State<UserStore>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    store.remove(id).await.ok_or(AppError::NotFound(id))?;
    tracing::debug!(%id, "user deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// 🧩 커스텀 추출기

// 경로 파라미터 파싱 실패를 AppError 로 변환
pub struct AppPath<T>(pub T);

impl<S, T> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

// JSON 파싱 후 validator 검증까지 마친 값만 핸들러로 넘김
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

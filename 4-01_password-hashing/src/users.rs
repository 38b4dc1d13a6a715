//! 🔐 `/api/users` 라우터: 가입(비밀번호 해시 저장)과 로그인(해시 비교)

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Request, State},
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    routing::post,
    Form, Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

use crate::{
    error::AppError,
    model::{LoginCredentials, NewUser, UserDocument, UserResponse},
    store::UserRepo,
};

/// 핸들러들이 공유하는 상태. 저장소는 trait object 라서 Mongo/메모리 구현을 바꿔 끼울 수 있음
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
}

// main 에서 `/api/users` 아래에 nest 됨
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/login", post(login))
}

// 응답은 항상 `{"data": ...}` 로 감쌈
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

// POST /api/users
// 가입: 본문 검증 → 비밀번호 해시 → 저장 → 201 + 공개 필드만 응답
async fn create_user(
    State(state): State<AppState>,
    ValidatedBody(input): ValidatedBody<NewUser>,
) -> Result<(StatusCode, Json<Data<Vec<UserResponse>>>), AppError> {
    // argon2 는 CPU 를 오래 쓰므로 async 워커가 아닌 blocking 스레드에서 실행
    // 평문 비밀번호는 여기서 해시로 바뀐 뒤 버려짐
    let user = tokio::task::spawn_blocking(move || UserDocument::from_new_user(input)).await??;

    // 같은 email 이 이미 있으면 StoreError::DuplicateEmail → 409
    state.users.insert(user.clone()).await?;

    // info 에는 id 만, email 은 개인정보라 debug 레벨에서만 남김
    tracing::info!(id = %user.id, "user created");
    tracing::debug!(id = %user.id, email = %user.email, "new user email");

    Ok((
        StatusCode::CREATED,
        Json(Data {
            data: vec![UserResponse::from(&user)],
        }),
    ))
}

// POST /api/users/login
// 로그인: email 로 찾고(없으면 404) 해시와 비교(다르면 401)
async fn login(
    State(state): State<AppState>,
    ValidatedBody(credentials): ValidatedBody<LoginCredentials>,
) -> Result<Json<Data<Vec<UserResponse>>>, AppError> {
    let user = state
        .users
        .find_by_email(&credentials.email)
        .await?
        .ok_or(AppError::NotFound)?;

    // 해시 비교도 가입과 같은 이유로 blocking 스레드에서
    let stored = user.clone();
    let matched =
        tokio::task::spawn_blocking(move || stored.compare_password(&credentials.password))
            .await??;

    if !matched {
        tracing::debug!(id = %user.id, "password mismatch");
        return Err(AppError::Unauthorized);
    }

    // 응답은 가입 때와 같은 모양 (해시는 절대 내보내지 않음)
    Ok(Json(Data {
        data: vec![UserResponse::from(&user)],
    }))
}

/// 🧩 Content-Type 에 따라 JSON 또는 Form 으로 파싱하고, validator 검증까지 마친 본문
pub struct ValidatedBody<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(mut req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // 미디어 타입은 대소문자를 구분하지 않음 (`Application/JSON` 도 JSON)
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let is_json = content_type.starts_with("application/json");
        let is_form = content_type.starts_with("application/x-www-form-urlencoded");

        if !is_json && !is_form {
            return Err(AppError::UnsupportedMediaType);
        }

        // axum 의 Form 추출기는 헤더를 대소문자 그대로 비교하므로 소문자로 바꿔서 넘김
        let normalized =
            HeaderValue::from_str(&content_type).map_err(|_| AppError::UnsupportedMediaType)?;
        req.headers_mut().insert(CONTENT_TYPE, normalized);

        let value = if is_json {
            // `application/jsonx` 처럼 접두사만 같은 타입은 Json 추출기가 415 로 거절
            let Json(value) = Json::<T>::from_request(req, state).await?;
            value
        } else {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            value
        };

        // 형식은 맞아도 email 모양, 빈 비밀번호 등은 여기서 400
        value.validate()?;
        Ok(Self(value))
    }
}

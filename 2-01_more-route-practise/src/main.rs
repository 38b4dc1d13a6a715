//! 메모리에 보관한 유저 목록을 `/api/v1/users` 아래에서 조회/추가/삭제하는 REST 실습.
//!
//! API:
//!
//! - `GET /api/v1/users`: 유저 목록 (생성 순서 유지)
//! - `POST /api/v1/users`: 유저 추가 → 201
//! - `GET /api/v1/users/{identifier}`: 유저 조회 → 없으면 404
//! - `DELETE /api/v1/users/{identifier}`: 유저 삭제 → 204, 없으면 404
//!
//! ```not_rust
//! cargo run -p example-more-route-practise
//! ```

mod error;
mod store;
mod users;

use axum::{
    extract::{MatchedPath, Request},
    Router, ServiceExt,
};
use tower_http::{normalize_path::NormalizePath, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::store::UserStore;

/// 🏁 main()

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 미리 네 명이 들어 있는 저장소 (재시작하면 초기화됨)
    let store = UserStore::seeded();

    let addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_owned());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("more-route-practise is running on {}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app(store))).await
}

// `/api/v1/users/` 처럼 끝에 `/` 가 붙은 요청도 같은 라우트로 보냄.
// `Router::layer` 는 라우팅 뒤에 실행되므로 Router 바깥을 감싸야 함
fn app(store: UserStore) -> NormalizePath<Router> {
    let router = Router::new()
        .nest("/api/v1/users", users::router())
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request| {
                let method = req.method();
                let uri = req.uri();
                let matched_path = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|matched| matched.as_str());

                tracing::debug_span!("request", %method, %uri, matched_path)
            }),
        )
        .with_state(store); // 공유 상태 등록

    NormalizePath::trim_trailing_slash(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    type App = NormalizePath<Router>;

    async fn send(app: &App, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&body).unwrap())
            }
            None => Body::empty(),
        };

        app.clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn list_names(app: &App) -> Vec<String> {
        let response = send(app, Method::GET, "/api/v1/users", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        body_json(response).await["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|user| user["name"].as_str().unwrap().to_owned())
            .collect()
    }

    async fn create(app: &App, name: &str) -> Value {
        let response = send(
            app,
            Method::POST,
            "/api/v1/users",
            Some(json!({ "user": { "name": name } })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        body_json(response).await["data"][0].clone()
    }

    #[tokio::test]
    async fn lists_seeded_users() {
        let app = app(UserStore::seeded());

        assert_eq!(list_names(&app).await, ["Phil", "Bailey", "Mary", "Samson"]);
    }

    #[tokio::test]
    async fn create_returns_created_user_with_id() {
        let app = app(UserStore::default());

        let user = create(&app, "Taylor").await;

        assert_eq!(user["name"], "Taylor");
        assert!(user["id"].as_str().unwrap().parse::<uuid::Uuid>().is_ok());
    }

    #[tokio::test]
    async fn list_keeps_creation_order() {
        let app = app(UserStore::default());

        create(&app, "A").await;
        create(&app, "B").await;
        create(&app, "C").await;

        assert_eq!(list_names(&app).await, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn show_returns_the_user() {
        let app = app(UserStore::default());
        let user = create(&app, "Bailey").await;
        let uri = format!("/api/v1/users/{}", user["id"].as_str().unwrap());

        let response = send(&app, Method::GET, &uri, None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "data": [user] }));
    }

    #[tokio::test]
    async fn show_unknown_user_is_not_found() {
        let app = app(UserStore::seeded());
        let uri = format!("/api/v1/users/{}", uuid::Uuid::new_v4());

        let response = send(&app, Method::GET, &uri, None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn malformed_identifier_is_bad_request() {
        let app = app(UserStore::seeded());

        let response = send(&app, Method::GET, "/api/v1/users/not-a-uuid", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_user() {
        let app = app(UserStore::default());
        create(&app, "A").await;
        let b = create(&app, "B").await;
        create(&app, "C").await;
        let uri = format!("/api/v1/users/{}", b["id"].as_str().unwrap());

        let response = send(&app, Method::DELETE, &uri, None).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
        assert_eq!(list_names(&app).await, ["A", "C"]);

        // 이미 지운 유저는 404
        let response = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(list_names(&app).await, ["A", "C"]);
    }

    #[tokio::test]
    async fn create_without_user_is_bad_request() {
        let app = app(UserStore::default());

        let response = send(
            &app,
            Method::POST,
            "/api/v1/users",
            Some(json!({ "name": "no wrapper" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(list_names(&app).await.is_empty());
    }

    #[tokio::test]
    async fn create_with_empty_name_is_bad_request() {
        let app = app(UserStore::default());

        let response = send(
            &app,
            Method::POST,
            "/api/v1/users",
            Some(json!({ "user": { "name": "" } })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Input validation error"));
    }

    #[tokio::test]
    async fn create_without_content_type_is_unsupported() {
        let app = app(UserStore::default());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/users")
                    .body(Body::from(r#"{"user":{"name":"A"}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn trailing_slash_reaches_the_collection() {
        let app = app(UserStore::seeded());

        let response = send(&app, Method::GET, "/api/v1/users/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 4);

        let response = send(
            &app,
            Method::POST,
            "/api/v1/users/",
            Some(json!({ "user": { "name": "Taylor" } })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(list_names(&app).await.last().unwrap(), "Taylor");
    }
}

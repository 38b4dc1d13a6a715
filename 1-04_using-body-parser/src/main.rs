//! 하위 라우터(`/router`)를 만들고, 요청 본문(JSON)을 파싱해서 되돌려주는 실습.
//!
//! 본문 파싱은 `AppJson` 추출기가 맡습니다. 파싱에 실패하면 핸들러까지 가지 않고
//! `AppError`로 바뀌어 `{"error": "..."}` 응답이 나갑니다.
//!
//! ```not_rust
//! cargo run -p example-using-body-parser
//!
//! curl -X POST 127.0.0.1:5000/router -H 'Content-Type: application/json' -d '{"hello":"there"}'
//! -> {"path":"/","method":"POST","payload":{"hello":"there"},"message":"there"}
//! ```

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::{Method, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

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

    let addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_owned());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("using-body-parser is running on {}", listener.local_addr()?);

    axum::serve(listener, app()).await
}

fn app() -> Router {
    // `/router` 로 시작하는 모든 요청은 하위 라우터가 처리
    Router::new()
        .nest("/router", router())
        .layer(TraceLayer::new_for_http())
}

// ✨ 하위 라우터: 경로 "/" 하나에 GET, POST 핸들러를 함께 등록
fn router() -> Router {
    Router::new().route("/", get(show_request).post(echo_body))
}

// GET /router
// 중첩된 라우터 안에서는 prefix 가 잘린 경로("/")가 보임
async fn show_request(method: Method, uri: Uri) -> Json<Value> {
    Json(json!({
        "data": {
            "path": uri.path(),
            "method": method.as_str(),
        }
    }))
}

#[derive(Debug, Serialize)]
struct EchoBody {
    path: String,
    method: String,
    payload: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<Value>,
}

// POST /router
// 본문이 JSON 으로 파싱된 경우에만 여기까지 옴
async fn echo_body(method: Method, uri: Uri, AppJson(payload): AppJson<Value>) -> Json<EchoBody> {
    let message = payload.get("hello").cloned();

    Json(EchoBody {
        path: uri.path().to_owned(),
        method: method.to_string(),
        payload,
        message,
    })
}

/// 🧩 JSON 추출기: 실패 시 rejection 을 AppError 로 변환
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
struct AppJson<T>(T);

/// 🚨 에러 타입
#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::JsonRejection(rejection) => {
                tracing::debug!(%rejection, "rejected request body");
                (rejection.status(), rejection.body_text())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn post_json(body: &'static str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/router")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn get_shows_path_and_method() {
        let response = app()
            .oneshot(Request::builder().uri("/router").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "data": { "path": "/", "method": "GET" } })
        );
    }

    #[tokio::test]
    async fn post_echoes_payload_and_message() {
        let response = app()
            .oneshot(post_json(r#"{"hello":"there","extra":[1,2]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "path": "/",
                "method": "POST",
                "payload": { "hello": "there", "extra": [1, 2] },
                "message": "there",
            })
        );
    }

    #[tokio::test]
    async fn post_without_hello_omits_message() {
        let response = app().oneshot(post_json(r#"{"other":1}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["payload"], json!({ "other": 1 }));
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let response = app().oneshot(post_json("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn missing_content_type_is_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/router")
                    .body(Body::from(r#"{"hello":"there"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    // 하위 라우터 밖의 경로는 처리하지 않음
    #[tokio::test]
    async fn paths_outside_the_router_are_not_found() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

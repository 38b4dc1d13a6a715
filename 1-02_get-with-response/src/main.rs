//! 같은 GET 요청이라도 응답 형태(HTML, JSON, 커스텀 상태 코드)를 다르게 돌려주는 실습.
//!
//! - `GET /html`   → HTML 문자열
//! - `GET /json`   → JSON 객체
//! - `GET /custom` → 상태 코드를 직접 지정한 텍스트
//!
//! ```not_rust
//! cargo run -p example-get-with-response
//! ```

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
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
    tracing::debug!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app()).await
}

fn app() -> Router {
    Router::new()
        .route("/html", get(html))
        .route("/json", get(json_data))
        .route("/custom", get(custom))
        .layer(TraceLayer::new_for_http())
}

/// 📚 라우트별 핸들러

// 1️⃣ GET /html
// Html 래퍼가 Content-Type: text/html 을 붙여줌
async fn html() -> Html<&'static str> {
    Html("<h1>Hello HTML</h1>")
}

// 2️⃣ GET /json
// Json 래퍼가 값을 문자열 JSON으로 직렬화
async fn json_data() -> Json<Value> {
    Json(json!({ "data": { "message": "Hello JSON" } }))
}

// 3️⃣ GET /custom
// (StatusCode, body) 튜플로 상태 코드를 직접 설정
async fn custom() -> impl IntoResponse {
    (StatusCode::ACCEPTED, "custom status response")
}

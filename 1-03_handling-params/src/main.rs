//! 요청에 담긴 정보(쿼리 스트링, 경로 파라미터, 메서드, 경로)를 꺼내서 그대로 돌려주는 실습.
//!
//! ```not_rust
//! cargo run -p example-handling-params
//!
//! curl '127.0.0.1:5000/query?hello=world&name=Taylor'
//! -> {"data":{"hello":"world","name":"Taylor"}}
//!
//! curl 127.0.0.1:5000/params/4444/something/moby-dick
//! -> {"data":{"identifier":"4444","bookName":"moby-dick"}}
//! ```

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query},
    http::{Method, Uri},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
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
        .route("/query", get(echo_query))
        // `{이름}` 부분은 경로에서 꺼낼 값의 이름일 뿐, 다른 무엇과도 연결되지 않음
        .route(
            "/params/{identifier}/something/{bookName}",
            get(echo_params),
        )
        .route("/method", get(echo_method))
        .route("/path", get(echo_path))
        .layer(TraceLayer::new_for_http())
}

// GET /query?hello=world&name=Taylor
// BTreeMap 으로 받으면 키 순서가 정렬되어 응답이 항상 같은 모양이 됨
async fn echo_query(Query(params): Query<BTreeMap<String, String>>) -> Json<Value> {
    Json(json!({ "data": params }))
}

/// 경로 파라미터 묶음. 필드 이름은 라우트에 적은 `{...}` 이름과 같아야 함
#[derive(Debug, Deserialize, Serialize)]
struct BookParams {
    identifier: String,
    #[serde(rename = "bookName")]
    book_name: String,
}

// GET /params/{identifier}/something/{bookName}
async fn echo_params(Path(params): Path<BookParams>) -> Json<Value> {
    Json(json!({ "data": params }))
}

// GET /method – 요청 메서드를 그대로 돌려줌
async fn echo_method(method: Method) -> Json<Value> {
    Json(json!({ "data": { "method": method.as_str() } }))
}

// GET /path – 요청 경로를 그대로 돌려줌
async fn echo_path(uri: Uri) -> Json<Value> {
    Json(json!({ "data": { "path": uri.path() } }))
}

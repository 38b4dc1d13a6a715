//! 첫 번째 GET 요청 실습: 서버를 띄우고 "/" 경로에 "hello world"를 돌려줍니다.
//!
//! 실행 방법:
//!
//! ```not_rust
//! cargo run -p example-first-get-request
//! curl 127.0.0.1:5000/
//! ```

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 리슨 주소를 지정하지 않았을 때 사용할 기본값
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // 1. 로그 초기화
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. 서버 바인딩 (LISTEN_ADDR 환경변수 또는 기본값)
    let addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_owned());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("first-get-request is running on {}", listener.local_addr()?);

    // 3. Axum 서버 실행
    axum::serve(listener, app()).await
}

/// 테스트에서도 그대로 쓸 수 있도록 라우터를 함수로 분리
fn app() -> Router {
    // "/" 경로로 들어오는 GET 요청을 handler 함수로 연결
    Router::new()
        .route("/", get(handler))
        .layer(TraceLayer::new_for_http())
}

// GET / → 일반 텍스트 응답
async fn handler() -> &'static str {
    "hello world"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use http_body_util::BodyExt; // for `collect`
    use tokio::net::TcpListener;
    use tower::ServiceExt; // for `oneshot`

    #[tokio::test]
    async fn root_says_hello_world() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"hello world");
    }

    // GET 이외의 메서드는 라우트가 있어도 405
    #[tokio::test]
    async fn post_to_root_is_not_allowed() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/does-not-exist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // 실제 TCP 서버를 띄우고 클라이언트처럼 요청
    #[tokio::test]
    async fn serves_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app()).await.unwrap();
        });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();

        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();

        assert!(raw.starts_with("HTTP/1.1 200 OK"));
        assert!(raw.ends_with("hello world"));
    }
}

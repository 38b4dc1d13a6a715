//! 비밀번호를 해시로 저장하고, 로그인 시 해시와 비교하는 유저 API.
//!
//! - `POST /api/users`: 가입 (`{"email": "...", "password": "..."}`) → 201
//! - `POST /api/users/login`: 로그인 → 200, email 없음 404, 비밀번호 불일치 401
//!
//! JSON 과 `application/x-www-form-urlencoded` 본문 모두 받습니다.
//! `USER_STORE=memory` 로 실행하면 MongoDB 없이 메모리 저장소를 씁니다.
//!
//! ```not_rust
//! DATABASE_URL=mongodb://localhost:27017 cargo run -p example-password-hashing
//! ```

mod config;
mod error;
mod model;
mod store;
mod users;

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Request},
    Router, ServiceExt,
};
use mongodb::{bson::doc, Client};
use tower_http::{normalize_path::NormalizePath, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    store::{InMemoryUserRepo, MongoUserRepo},
    users::AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let state = if config.in_memory {
        tracing::warn!("USER_STORE=memory: users are lost on restart");
        AppState {
            users: Arc::new(InMemoryUserRepo::default()),
        }
    } else {
        AppState {
            users: Arc::new(connect(&config).await?),
        }
    };

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Server is running on {}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app(state))).await?;
    Ok(())
}

// 🧭 DB 연결: 실패하면 로그를 남기고 종료
async fn connect(config: &Config) -> Result<MongoUserRepo, Box<dyn std::error::Error>> {
    let client = Client::with_uri_str(&config.database_url).await?;
    let db = client.database(&config.database_name);
    if let Err(err) = db.run_command(doc! { "ping": 1 }).await {
        tracing::error!(%err, url = %config.database_url, "could not reach database");
        return Err(err.into());
    }
    tracing::info!("Connected to database at '{}'", config.database_url);

    Ok(MongoUserRepo::init(&db).await?)
}

// 끝에 `/` 가 붙은 `/api/users/` 도 받도록 Router 바깥에서 경로를 정규화
fn app(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .nest("/api/users", users::router())
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
        .with_state(state);

    NormalizePath::trim_trailing_slash(router)
}

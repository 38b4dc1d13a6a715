//! MongoDB 에 `users`, `comments` 두 가지 문서 모양을 정의하고 저장/조회해보는 실습.
//!
//! 1. DB 연결 후 ping
//! 2. 유저 목록 조회 (비어 있으면 한 명 추가)
//! 3. 유저를 참조하는 댓글 저장
//! 4. 댓글 목록을 작성자와 함께 출력
//!
//! `DOCUMENT_STORE=memory` 로 실행하면 MongoDB 없이 같은 흐름을 메모리에서 돌려봄.
//!
//! ```not_rust
//! DATABASE_URL=mongodb://localhost:27017 cargo run -p example-schema-intro
//! ```

mod config;
mod models;
mod store;

use mongodb::{bson::doc, Client};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    models::{Comment, SchemaError, User, COMMENTS, USERS},
    store::{InMemoryStore, Store},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if config.in_memory {
        tracing::warn!("DOCUMENT_STORE=memory: nothing is persisted");
        let users = InMemoryStore::<User>::default();
        let comments = InMemoryStore::<Comment>::default();
        return Ok(run(&users, &comments).await?);
    }

    // 🧭 DB 연결 & ping
    let client = Client::with_uri_str(&config.database_url).await?;
    let db = client.database(&config.database_name);
    if let Err(err) = db.run_command(doc! { "ping": 1 }).await {
        tracing::error!(%err, url = %config.database_url, "could not reach database");
        return Err(err.into());
    }
    tracing::info!("Connected to server: {}", config.database_url);

    let users = db.collection::<User>(USERS);
    let comments = db.collection::<Comment>(COMMENTS);

    Ok(run(&users, &comments).await?)
}

async fn run(
    users: &impl Store<User>,
    comments: &impl Store<Comment>,
) -> Result<(), SchemaError> {
    // 👥 유저 목록
    let mut all_users = users.find_all().await?;
    if all_users.is_empty() {
        let friend = User::new("Reese", "Wimbly").save(users).await?;
        all_users.push(friend);
    }
    tracing::info!(?all_users, "users");

    // 💬 첫 번째 유저를 참조하는 댓글 저장
    let author_id = all_users.first().and_then(|user| user.id);
    let comment = Comment::new("I think you're awesome!", author_id)?
        .save(comments)
        .await?;
    tracing::info!(?comment, "comment saved");

    // 📜 댓글 목록 + 참조된 작성자 조회
    for comment in comments.find_all().await? {
        let author = comment.author(users).await?;
        tracing::info!(body = %comment.body, date = ?comment.date, ?author, "comment");
    }

    Ok(())
}

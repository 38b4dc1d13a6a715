//! 🗄️ 유저 저장소: 핸들러는 `UserRepo` 트레이트만 알고, 실제 구현은 주입받음
//!
//! - [`MongoUserRepo`]: MongoDB `users` 컬렉션 (email 에 unique 인덱스)
//! - [`InMemoryUserRepo`]: 프로세스 메모리 (테스트, DB 없이 실행할 때)

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::model::UserDocument;

// 컬렉션 이름
pub const USERS: &str = "users";

/// MongoDB duplicate key 에러 코드
/// (unique 인덱스에 이미 있는 값을 넣으면 서버가 이 코드로 거절함)
const DUPLICATE_KEY: i32 = 11000;

/// 저장소 에러. 핸들러 쪽 `AppError` 에서 409 / 500 으로 나뉨
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email {0} is already registered")]
    DuplicateEmail(String),

    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}

// `Arc<dyn UserRepo>` 로 쓰려면 async 메서드를 가진 trait 이 object-safe 해야 해서 async_trait 사용
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// email 이 이미 있으면 `StoreError::DuplicateEmail`
    async fn insert(&self, user: UserDocument) -> Result<(), StoreError>;

    /// 없으면 `Ok(None)` (에러가 아님)
    async fn find_by_email(&self, email: &str) -> Result<Option<UserDocument>, StoreError>;
}

/// 🍃 MongoDB 구현

#[derive(Debug, Clone)]
pub struct MongoUserRepo {
    collection: Collection<UserDocument>,
}

impl MongoUserRepo {
    /// 컬렉션을 잡고 email unique 인덱스를 보장
    pub async fn init(db: &Database) -> Result<Self, StoreError> {
        let collection = db.collection::<UserDocument>(USERS);

        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        // 이미 같은 인덱스가 있으면 아무 일도 하지 않음 (재시작해도 안전)
        collection.create_index(index).await?;

        Ok(Self { collection })
    }
}

#[async_trait]
impl UserRepo for MongoUserRepo {
    async fn insert(&self, user: UserDocument) -> Result<(), StoreError> {
        // 중복 검사는 unique 인덱스에 맡김: 먼저 조회하고 넣으면 그 사이에 다른 요청이 끼어들 수 있음
        match self.collection.insert_one(&user).await {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => Err(StoreError::DuplicateEmail(user.email)),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserDocument>, StoreError> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }
}

// insert 실패 중 "unique 인덱스 위반" 만 골라냄.
// 연결 끊김 같은 다른 에러는 그대로 `StoreError::Database` 로 올려보냄
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

/// 🧠 메모리 구현

// clone 해도 같은 Vec 을 가리킴 (테스트에서 앱과 저장소를 함께 들고 확인할 때 사용)
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepo {
    users: Arc<RwLock<Vec<UserDocument>>>,
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn insert(&self, user: UserDocument) -> Result<(), StoreError> {
        // 중복 검사와 추가를 같은 쓰기 락 안에서 처리
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(StoreError::DuplicateEmail(user.email));
        }
        users.push(user);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserDocument>, StoreError> {
        // 읽기만 하므로 read 락 (여러 요청이 동시에 읽을 수 있음)
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }
}

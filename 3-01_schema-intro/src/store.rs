//! 🗄️ 문서 저장소: 모델은 `Store` 트레이트만 알고, 실제 구현은 호출하는 쪽이 고름
//!
//! - `Collection<T>`: MongoDB 컬렉션 그대로
//! - [`InMemoryStore`]: 프로세스 메모리 (테스트, DB 없이 돌려볼 때)

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt; // for `try_collect`
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection,
};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::models::SchemaError;

/// 컬렉션에 들어갈 수 있는 문서. `_id` 로 다시 찾을 수 있어야 함
pub trait Document: Clone + Serialize + DeserializeOwned + Unpin + Send + Sync + 'static {
    fn id(&self) -> Option<ObjectId>;
}

#[async_trait]
pub trait Store<T: Document>: Send + Sync {
    async fn insert(&self, document: &T) -> Result<(), SchemaError>;

    /// 없으면 `Ok(None)` (에러가 아님)
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>, SchemaError>;

    /// 저장된 순서대로
    async fn find_all(&self) -> Result<Vec<T>, SchemaError>;
}

/// 🍃 MongoDB 구현
#[async_trait]
impl<T: Document> Store<T> for Collection<T> {
    async fn insert(&self, document: &T) -> Result<(), SchemaError> {
        self.insert_one(document).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>, SchemaError> {
        Ok(self.find_one(doc! { "_id": id }).await?)
    }

    async fn find_all(&self) -> Result<Vec<T>, SchemaError> {
        Ok(self.find(doc! {}).await?.try_collect().await?)
    }
}

/// 🧠 메모리 구현. clone 해도 같은 Vec 을 가리킴
#[derive(Debug)]
pub struct InMemoryStore<T> {
    documents: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
        }
    }
}

// derive 하면 `T: Default` 가 필요해져서 직접 구현
impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            documents: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl<T: Document> Store<T> for InMemoryStore<T> {
    async fn insert(&self, document: &T) -> Result<(), SchemaError> {
        self.documents.write().await.push(document.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>, SchemaError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .find(|document| document.id() == Some(id))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, SchemaError> {
        Ok(self.documents.read().await.clone())
    }
}

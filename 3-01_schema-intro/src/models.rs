//! 📄 컬렉션에 저장될 문서 모양(스키마) 정의
//!
//! - `users`: 이름만 가진 단순한 유저 문서
//! - `comments`: 본문(필수), 작성 시각(문서마다 기본값), 작성자 참조(ObjectId)

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::store::{Document, Store};

pub const USERS: &str = "users";
pub const COMMENTS: &str = "comments";

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl User {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
        }
    }

    /// 저장 전에 `_id` 를 채워서 돌아온 문서가 바로 참조에 쓰일 수 있게 함
    pub async fn save<S>(mut self, users: &S) -> Result<Self, SchemaError>
    where
        S: Store<User> + ?Sized,
    {
        let id = *self.id.get_or_insert_with(ObjectId::new);
        users.insert(&self).await?;
        tracing::debug!(%id, "user saved");
        Ok(self)
    }
}

impl Document for User {
    fn id(&self) -> Option<ObjectId> {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Comment {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[validate(length(min = 1, message = "body is required"))]
    pub body: String,

    // 문서마다 새로 계산되는 기본값
    #[serde(default = "DateTime::now")]
    pub date: DateTime,

    /// `users` 컬렉션 문서의 `_id`. 값만 들고 있고 실제 유저는 [`Comment::author`] 로 조회
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ObjectId>,
}

impl Comment {
    pub fn new(body: impl Into<String>, user: Option<ObjectId>) -> Result<Self, SchemaError> {
        let comment = Self {
            id: None,
            body: body.into(),
            date: DateTime::now(),
            user,
        };
        comment.validate()?;
        Ok(comment)
    }

    /// 검증을 통과한 문서만 저장 (역직렬화로 만든 문서도 여기서 한 번 더 검사)
    pub async fn save<S>(mut self, comments: &S) -> Result<Self, SchemaError>
    where
        S: Store<Comment> + ?Sized,
    {
        self.validate()?;
        let id = *self.id.get_or_insert_with(ObjectId::new);
        comments.insert(&self).await?;
        tracing::debug!(%id, "comment saved");
        Ok(self)
    }

    /// 참조된 작성자를 그때그때 조회. 참조가 없거나 지워졌으면 `None`
    pub async fn author<S>(&self, users: &S) -> Result<Option<User>, SchemaError>
    where
        S: Store<User> + ?Sized,
    {
        let Some(user_id) = self.user else {
            return Ok(None);
        };

        users.find_by_id(user_id).await
    }
}

impl Document for Comment {
    fn id(&self) -> Option<ObjectId> {
        self.id
    }
}

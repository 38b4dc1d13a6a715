//! 🧍 유저 문서와 요청/응답 모양, 그리고 비밀번호 해시 처리
//!
//! 평문 비밀번호는 [`NewUser`] 에서 [`UserDocument`] 로 바뀌는 순간 argon2 해시로 대체되며,
//! 이후 어디에도 저장되거나 응답으로 나가지 않습니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use argon2::password_hash::Error as HashError;

/// POST /api/users 본문
#[derive(Deserialize, Validate)]
pub struct NewUser {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Can not be empty"))]
    pub password: String,
}

/// POST /api/users/login 본문
#[derive(Deserialize, Validate)]
pub struct LoginCredentials {
    #[validate(length(min = 1, message = "Can not be empty"))]
    pub email: String,
    #[validate(length(min = 1, message = "Can not be empty"))]
    pub password: String,
}

/// `users` 컬렉션에 저장되는 문서. `password` 에는 PHC 형식 해시만 들어감
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    pub password: String,
}

impl UserDocument {
    /// 저장 직전 단계: 새 ID를 붙이고 비밀번호를 해시로 바꿈
    ///
    /// argon2 는 CPU 를 오래 쓰므로 async 컨텍스트에서는 `spawn_blocking` 안에서 호출할 것.
    pub fn from_new_user(new_user: NewUser) -> Result<Self, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(new_user.password.as_bytes(), &salt)?
            .to_string();

        Ok(Self {
            id: ObjectId::new(),
            email: new_user.email,
            password: hash,
        })
    }

    /// 후보 비밀번호가 저장된 해시와 맞는지 확인. 비교는 argon2 검증기가 상수 시간으로 수행
    pub fn compare_password(&self, candidate: &str) -> Result<bool, HashError> {
        let parsed = PasswordHash::new(&self.password)?;

        match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// 클라이언트에게 보여주는 유저 정보 (해시 제외)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
}

impl From<&UserDocument> for UserResponse {
    fn from(user: &UserDocument) -> Self {
        Self {
            id: user.id.to_hex(),
            email: user.email.clone(),
        }
    }
}

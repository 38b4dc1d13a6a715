//! 📦 프로세스 메모리에 유저 목록을 보관하는 저장소.
//!
//! 요청마다 동시에 접근하므로 목록은 `RwLock` 뒤에 두고, 모든 변경은 쓰기 락 안에서만 일어납니다.
//! `Vec` 이라서 목록 조회 시 생성 순서가 그대로 유지됩니다.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

/// 서버를 켤 때 미리 들어 있는 유저들
pub const SEED_NAMES: [&str; 4] = ["Phil", "Bailey", "Mary", "Samson"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
}

impl User {
    fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(), // 한 번 부여한 ID는 바뀌지 않음
            name,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserStore {
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let users = names.into_iter().map(|name| User::new(name.into())).collect();

        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    pub fn seeded() -> Self {
        Self::with_names(SEED_NAMES)
    }

    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn get(&self, id: Uuid) -> Option<User> {
        self.users.read().await.iter().find(|user| user.id == id).cloned()
    }

    /// 새 ID를 부여해 목록 끝에 추가
    pub async fn insert(&self, name: String) -> User {
        let user = User::new(name);
        self.users.write().await.push(user.clone());
        user
    }

    /// 해당 ID의 유저만 빼고, 나머지 순서는 그대로 둠
    pub async fn remove(&self, id: Uuid) -> Option<User> {
        let mut users = self.users.write().await;
        let index = users.iter().position(|user| user.id == id)?;
        Some(users.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(users: &[User]) -> Vec<&str> {
        users.iter().map(|user| user.name.as_str()).collect()
    }

    #[tokio::test]
    async fn seeded_store_keeps_seed_order() {
        let store = UserStore::seeded();

        assert_eq!(names(&store.list().await), SEED_NAMES);
    }

    #[tokio::test]
    async fn insert_appends_with_fresh_id() {
        let store = UserStore::default();

        let a = store.insert("A".to_owned()).await;
        let b = store.insert("B".to_owned()).await;

        assert_ne!(a.id, b.id);
        assert_eq!(store.list().await, vec![a.clone(), b]);
        assert_eq!(store.get(a.id).await, Some(a));
    }

    #[tokio::test]
    async fn remove_takes_out_only_the_match() {
        let store = UserStore::seeded();
        let mary = store.list().await[2].clone();

        assert_eq!(store.remove(mary.id).await, Some(mary.clone()));
        assert_eq!(names(&store.list().await), ["Phil", "Bailey", "Samson"]);

        // 두 번째 삭제는 아무것도 하지 않음
        assert_eq!(store.remove(mary.id).await, None);
        assert_eq!(store.list().await.len(), 3);
    }

    #[tokio::test]
    async fn concurrent_inserts_are_not_lost() {
        let store = UserStore::default();

        let tasks: Vec<_> = (0..50)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.insert(format!("user-{i}")).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.list().await.len(), 50);
    }
}

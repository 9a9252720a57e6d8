/*
 * Responsibility
 * - UserRepo / BookmarkRepo の in-memory 実装 (起動時と test で使う)
 * - ロックは各操作の中だけで保持し、await をまたがない
 */
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::{BookmarkRepo, RepoError, UserRepo, UserRow};

#[derive(Debug, Clone)]
struct BookmarkRow {
    id: Uuid,
    title: String,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, UserRow>>,
    // owner_id -> bookmarks in insertion order
    bookmarks: RwLock<HashMap<String, Vec<BookmarkRow>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn create(&self, email: &str, password_hash: &str) -> Result<UserRow, RepoError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(RepoError::Conflict);
        }

        let row = UserRow {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get(&self, user_id: &str) -> Result<Option<UserRow>, RepoError> {
        let Ok(id) = Uuid::parse_str(user_id) else {
            return Ok(None);
        };
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn delete(&self, user_id: &str) -> Result<Option<UserRow>, RepoError> {
        let Ok(id) = Uuid::parse_str(user_id) else {
            return Ok(None);
        };
        Ok(self.users.write().await.remove(&id))
    }
}

#[async_trait]
impl BookmarkRepo for MemoryStore {
    async fn create(&self, owner_id: &str, title: &str) -> Result<Uuid, RepoError> {
        let mut bookmarks = self.bookmarks.write().await;
        let owned = bookmarks.entry(owner_id.to_string()).or_default();
        if owned.iter().any(|b| b.title == title) {
            return Err(RepoError::Conflict);
        }

        let id = Uuid::new_v4();
        owned.push(BookmarkRow {
            id,
            title: title.to_string(),
        });
        Ok(id)
    }

    async fn list(&self, owner_id: &str) -> Result<Vec<String>, RepoError> {
        Ok(self
            .bookmarks
            .read()
            .await
            .get(owner_id)
            .map(|owned| owned.iter().map(|b| b.title.clone()).collect())
            .unwrap_or_default())
    }

    async fn delete(&self, owner_id: &str, title: &str) -> Result<(), RepoError> {
        let mut bookmarks = self.bookmarks.write().await;
        let owned = bookmarks.get_mut(owner_id).ok_or(RepoError::NotFound)?;
        let pos = owned
            .iter()
            .position(|b| b.title == title)
            .ok_or(RepoError::NotFound)?;
        let removed = owned.remove(pos);
        if owned.is_empty() {
            bookmarks.remove(owner_id);
        }
        tracing::debug!(owner_id, bookmark_id = %removed.id, "bookmark deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bookmarks_are_listed_in_insertion_order() {
        let store = MemoryStore::new();
        let titles = ["ABC", "DEF", "GHI", "JKL", "MNO"];
        for t in titles {
            BookmarkRepo::create(&store, "windex", t).await.unwrap();
        }

        assert_eq!(store.list("windex").await.unwrap(), titles);
        assert!(store.list("bilbo").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_title_for_same_owner_conflicts() {
        let store = MemoryStore::new();
        BookmarkRepo::create(&store, "u1", "rust").await.unwrap();

        assert!(matches!(
            BookmarkRepo::create(&store, "u1", "rust").await,
            Err(RepoError::Conflict)
        ));
        // other owners are independent
        assert!(BookmarkRepo::create(&store, "u2", "rust").await.is_ok());
    }

    #[tokio::test]
    async fn delete_removes_only_the_owners_bookmark() {
        let store = MemoryStore::new();
        BookmarkRepo::create(&store, "u1", "rust").await.unwrap();
        BookmarkRepo::create(&store, "u2", "rust").await.unwrap();

        BookmarkRepo::delete(&store, "u1", "rust").await.unwrap();
        assert!(store.list("u1").await.unwrap().is_empty());
        assert!(!store.bookmarks.read().await.contains_key("u1"));
        assert_eq!(store.list("u2").await.unwrap(), ["rust"]);

        assert!(matches!(
            BookmarkRepo::delete(&store, "u1", "rust").await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            BookmarkRepo::delete(&store, "nobody", "rust").await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn users_have_unique_emails() {
        let store = MemoryStore::new();
        let row = UserRepo::create(&store, "cookie@sesame.com", "salt$hash")
            .await
            .unwrap();

        assert!(matches!(
            UserRepo::create(&store, "COOKIE@sesame.com", "x").await,
            Err(RepoError::Conflict)
        ));

        let id = row.id.to_string();
        let found = UserRepo::get(&store, &id).await.unwrap().unwrap();
        assert_eq!(found.email, "cookie@sesame.com");
        assert_eq!(found.password_hash, "salt$hash");

        assert!(UserRepo::get(&store, "ASDFQWER").await.unwrap().is_none());
        assert!(UserRepo::delete(&store, &id).await.unwrap().is_some());
        assert!(UserRepo::get(&store, &id).await.unwrap().is_none());
    }
}

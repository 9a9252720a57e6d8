/*
 * Responsibility
 * - bookmarks の保存操作 (owner 単位)
 * - (owner_id, title) は一意
 */
use async_trait::async_trait;
use uuid::Uuid;

use crate::repos::error::RepoError;

#[async_trait]
pub trait BookmarkRepo: Send + Sync {
    /// Fails with `Conflict` when the owner already has a bookmark with this title.
    async fn create(&self, owner_id: &str, title: &str) -> Result<Uuid, RepoError>;

    /// Titles in insertion order.
    async fn list(&self, owner_id: &str) -> Result<Vec<String>, RepoError>;

    /// Fails with `NotFound` when the owner has no bookmark with this title.
    async fn delete(&self, owner_id: &str, title: &str) -> Result<(), RepoError>;
}

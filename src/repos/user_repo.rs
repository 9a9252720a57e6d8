/*
 * Responsibility
 * - users の保存操作 (create / get / delete)
 * - email は一意。重複は RepoError::Conflict
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "stored for the login flow, which lives in the token issuer")
    )]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, email: &str, password_hash: &str) -> Result<UserRow, RepoError>;

    /// `user_id` is the opaque path value; ids that are not UUIDs simply do not exist.
    async fn get(&self, user_id: &str) -> Result<Option<UserRow>, RepoError>;

    async fn delete(&self, user_id: &str) -> Result<Option<UserRow>, RepoError>;
}

/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 */
use thiserror::Error;

use crate::error::{AppError, CONFLICT_MESSAGE};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("conflict")]
    Conflict,
    #[error("not found")]
    NotFound,
    /// Backend failure. The detail is for logs only.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

// Handlers map Conflict / NotFound with resource-specific messages first;
// this is the generic fallback.
impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::conflict(CONFLICT_MESSAGE),
            RepoError::NotFound => AppError::not_found("Resource"),
            RepoError::Unavailable(detail) => AppError::internal(detail),
        }
    }
}

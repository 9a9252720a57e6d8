/*
 * Responsibility
 * - 未定義の path / method に対する応答 (どちらも同じ NotFound)
 */
use crate::error::AppError;

pub async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}

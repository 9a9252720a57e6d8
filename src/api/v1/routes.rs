/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /users, /users/{userId}, /users/{userId}/bookmarks
 * - 既知の path への未対応 method も Route not found (405 の空 body を返さない)
 * - 認証・認可は route_layer ではなく各 handler の Pipeline で掛ける (検証順序を固定するため)
 */
use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    bookmarks::{create_bookmark, delete_bookmark, list_bookmarks},
    fallback::route_not_found,
    health::health,
    users::{create_user, delete_user, get_user},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/users", post(create_user))
        .route("/users/{userId}", get(get_user).delete(delete_user))
        .route(
            "/users/{userId}/bookmarks",
            get(list_bookmarks).post(create_bookmark),
        )
        .route("/users/{userId}/bookmarks/{title}", delete(delete_bookmark))
        .method_not_allowed_fallback(route_not_found)
}

/*!
 * Request context extractor
 *
 * Responsibility:
 * - path params / JSON body / Authorization header を 1 つの RequestContext にまとめて handler に渡す
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - RequestContext
 * - JsonBody
 */

mod core;
mod types;

pub use types::{BODY_FIELD, BODY_NOT_OBJECT_MESSAGE, JsonBody, RequestContext};

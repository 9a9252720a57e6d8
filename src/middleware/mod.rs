/*
 * Responsibility
 * - middleware の公開インターフェース
 * - 認証・認可は middleware ではなく services::pipeline 側 (Validator を先に通すため)
 */
pub mod cors;
pub mod http;

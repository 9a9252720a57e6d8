/*
 * Responsibility
 * - users / bookmarks の保存先 (狭い trait 越しに使う)
 * - 失敗は RepoError だけ。下位の失敗 (driver / network) を素通しさせない
 */
pub mod bookmark_repo;
pub mod error;
pub mod memory;
pub mod user_repo;

pub use bookmark_repo::BookmarkRepo;
pub use error::RepoError;
pub use memory::MemoryStore;
pub use user_repo::{UserRepo, UserRow};

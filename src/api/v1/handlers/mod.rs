pub mod bookmarks;
pub mod fallback;
pub mod health;
pub mod users;

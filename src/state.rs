/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - authenticator (不変の設定から起動時に生成), users / bookmarks repo
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::{BookmarkRepo, UserRepo};
use crate::services::auth::TokenAuthenticator;
use crate::services::pipeline::Pipeline;
use crate::services::validation::FieldRule;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<TokenAuthenticator>,
    pub users: Arc<dyn UserRepo>,
    pub bookmarks: Arc<dyn BookmarkRepo>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        auth: Arc<TokenAuthenticator>,
        users: Arc<dyn UserRepo>,
        bookmarks: Arc<dyn BookmarkRepo>,
    ) -> Self {
        Self {
            auth,
            users,
            bookmarks,
        }
    }

    /// Pipeline for an owned route with the given field rules.
    pub fn pipeline(&self, rules: &'static [FieldRule]) -> Pipeline<'_> {
        Pipeline::new(rules, &self.auth)
    }
}

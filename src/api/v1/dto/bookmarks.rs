/*
 * Responsibility
 * - Bookmarks の request/response DTO と FieldRule
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::v1::dto::users::USER_ID_RULE;
use crate::services::validation::FieldRule;

pub const TITLE_PARAM: &str = "title";
const TITLE_MESSAGE: &str = "Bookmark title cannot be empty";

pub const LIST_BOOKMARKS_RULES: &[FieldRule] = &[USER_ID_RULE];

pub const CREATE_BOOKMARK_RULES: &[FieldRule] =
    &[USER_ID_RULE, FieldRule::body(TITLE_PARAM, TITLE_MESSAGE)];

pub const DELETE_BOOKMARK_RULES: &[FieldRule] =
    &[USER_ID_RULE, FieldRule::path(TITLE_PARAM, TITLE_MESSAGE)];

#[derive(Debug, Deserialize)]
pub struct CreateBookmarkRequest {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct BookmarksResponse {
    pub bookmarks: Vec<String>,
}

/*
 * Responsibility
 * - /users/{userId}/bookmarks 系 handler
 * - Validator → Authenticator → Authorizer を Pipeline で通してから repo を呼ぶ
 * - RepoError はここでリソース固有のメッセージ付き AppError に変換する
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::bookmarks::{
            BookmarkResponse, BookmarksResponse, CREATE_BOOKMARK_RULES, CreateBookmarkRequest,
            DELETE_BOOKMARK_RULES, LIST_BOOKMARKS_RULES, TITLE_PARAM,
        },
        extractors::RequestContext,
    },
    error::AppError,
    repos::RepoError,
    state::AppState,
};

pub async fn list_bookmarks(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<BookmarksResponse>, AppError> {
    let bookmarks = &state.bookmarks;

    state
        .pipeline(LIST_BOOKMARKS_RULES)
        .run(ctx, |req| async move {
            let titles = bookmarks.list(req.owner_id()).await?;
            Ok(Json(BookmarksResponse { bookmarks: titles }))
        })
        .await
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<(StatusCode, Json<BookmarkResponse>), AppError> {
    let bookmarks = &state.bookmarks;

    state
        .pipeline(CREATE_BOOKMARK_RULES)
        .run(ctx, |req| async move {
            let body: CreateBookmarkRequest = req.body_as()?;

            let id = bookmarks
                .create(req.owner_id(), &body.title)
                .await
                .map_err(|e| match e {
                    RepoError::Conflict => AppError::conflict("Bookmark already exists"),
                    other => other.into(),
                })?;

            Ok((
                StatusCode::CREATED,
                Json(BookmarkResponse {
                    id,
                    title: body.title,
                }),
            ))
        })
        .await
}

pub async fn delete_bookmark(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<StatusCode, AppError> {
    let bookmarks = &state.bookmarks;

    state
        .pipeline(DELETE_BOOKMARK_RULES)
        .run(ctx, |req| async move {
            let title = req.path_param(TITLE_PARAM).unwrap_or_default();

            bookmarks
                .delete(req.owner_id(), title)
                .await
                .map_err(|e| match e {
                    RepoError::NotFound => {
                        AppError::NotFound(format!("Bookmark with title \"{title}\" not found").into())
                    }
                    other => other.into(),
                })?;

            Ok(StatusCode::NO_CONTENT)
        })
        .await
}

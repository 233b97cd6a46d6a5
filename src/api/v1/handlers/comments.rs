/*
 * Responsibility
 * - /posts/{post_id}/comments 系 CRUD handler
 * - 親 post に属さない comment は存在しないものとして扱う (404)
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::{
            comments::{CommentContentRequest, CommentResponse},
            pagination::ListQuery,
        },
        extractors::{AuthCtxExtractor, JsonBody},
    },
    error::AppError,
    state::AppState,
};

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let (limit, offset) = query.page();
    let rows = state.comments.list(post_id, limit, offset).await?;
    Ok(Json(rows.into_iter().map(CommentResponse::from).collect()))
}

pub async fn create_comment(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(post_id): Path<i64>,
    JsonBody(req): JsonBody<CommentContentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    let row = state
        .comments
        .create(ctx.user_id, post_id, &req.content)
        .await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_comment(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> Result<Json<CommentResponse>, AppError> {
    let row = state.comments.get(post_id, comment_id).await?;
    Ok(Json(row.into()))
}

pub async fn update_comment(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    JsonBody(req): JsonBody<CommentContentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    let row = state
        .comments
        .update(ctx.user_id, post_id, comment_id, &req.content)
        .await?;
    Ok(Json(row.into()))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    state
        .comments
        .delete(ctx.user_id, post_id, comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

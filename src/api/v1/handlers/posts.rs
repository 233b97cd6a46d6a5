/*
 * Responsibility
 * - /posts 系 CRUD handler
 * - 更新/削除の所有者チェックは service (OwnershipGuard) 側で行う
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::{
            pagination::ListQuery,
            posts::{PostContentRequest, PostDetailResponse, PostResponse},
        },
        extractors::{AuthCtxExtractor, JsonBody},
    },
    error::AppError,
    state::AppState,
};

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let (limit, offset) = query.page();
    let rows = state.posts.list(limit, offset).await?;
    Ok(Json(rows.into_iter().map(PostResponse::from).collect()))
}

pub async fn create_post(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    JsonBody(req): JsonBody<PostContentRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let row = state.posts.create(ctx.user_id, &req.content).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<PostDetailResponse>, AppError> {
    let post = state.posts.get(post_id).await?;
    Ok(Json(post.into()))
}

pub async fn update_post(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(post_id): Path<i64>,
    JsonBody(req): JsonBody<PostContentRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let row = state
        .posts
        .update(ctx.user_id, post_id, &req.content)
        .await?;
    Ok(Json(row.into()))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(post_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.posts.delete(ctx.user_id, post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/*
 * Responsibility
 * - /users/me (自分のプロフィールの参照・更新)
 * - 対象ユーザーは常に AuthCtx の user_id (path で他人を指定させない)
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::{
        dto::users::UpdateProfileRequest,
        extractors::{AuthCtxExtractor, JsonBody},
    },
    error::AppError,
    services::auth::UserProfile,
    state::AppState,
};

pub async fn get_me(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(state.users.profile(ctx.user_id).await?))
}

pub async fn update_me(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    JsonBody(req): JsonBody<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state.users.update_profile(ctx.user_id, req.into()).await?;
    Ok(Json(profile))
}

/*
 * Responsibility
 * - ドメインロジック (認証・認可・投稿/コメント操作)
 * - handler からは service だけを呼ぶ (repo を直接触らない)
 */
use tracing::error;

use crate::error::AppError;
use crate::repos::RepoError;

pub mod auth;
pub mod comments;
pub mod ownership;
pub mod password;
pub mod posts;
pub mod users;
pub mod validation;

/// Log a storage failure and hide it behind `Internal`.
pub(crate) fn internal(e: RepoError, context: &'static str) -> AppError {
    error!(error = %e, "{context}");
    AppError::Internal
}

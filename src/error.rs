/*
 * Responsibility
 * - アプリ共通の AppError 定義 (エラー種別は閉じた enum)
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - RepoError を統一的に変換 (Internal はログに残し、外には詳細を出さない)
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;

/// Message shared by every credential failure on login.
pub const INVALID_CREDENTIALS: &str = "invalid email or password";
/// Message shared by every token failure (missing, forged, expired, wrong alg).
pub const INVALID_TOKEN: &str = "invalid or expired token";
pub const DUPLICATE_ACCOUNT: &str = "duplicate email or username";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("not allowed to modify this {resource}")]
    Forbidden { resource: &'static str },
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    #[error("{0}")]
    Conflict(&'static str),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn forbidden(resource: &'static str) -> Self {
        Self::Forbidden { resource }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden { .. } => "FORBIDDEN",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Internal => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let (message, field) = match self {
            AppError::Validation { field, message } => (message, Some(field)),
            other => (other.to_string(), None),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message,
                field,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::Conflict(DUPLICATE_ACCOUNT),
            // 呼び出し側でログを出してから変換すること
            RepoError::MissingReference | RepoError::Db(_) => AppError::Internal,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::JsonSyntaxError(_) => "request body is not valid JSON",
            JsonRejection::JsonDataError(_) => "request body has missing or mistyped fields",
            JsonRejection::MissingJsonContentType(_) => "expected an application/json body",
            _ => "request body could not be read",
        };
        AppError::validation("body", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_is_exhaustive() {
        assert_eq!(
            AppError::validation("email", "email is required").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized(INVALID_TOKEN).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::forbidden("post").status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::not_found("post").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Conflict(DUPLICATE_ACCOUNT).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_is_opaque() {
        assert_eq!(AppError::Internal.to_string(), "internal server error");
    }

    #[test]
    fn test_repo_conflict_maps_to_conflict() {
        assert_eq!(
            AppError::from(RepoError::Conflict),
            AppError::Conflict(DUPLICATE_ACCOUNT)
        );
        assert_eq!(
            AppError::from(RepoError::Db(sqlx::Error::PoolTimedOut)),
            AppError::Internal
        );
    }
}

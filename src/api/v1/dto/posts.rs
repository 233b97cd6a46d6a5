/*
 * Responsibility
 * - Posts の request/response DTO
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::v1::dto::comments::CommentResponse;
use crate::repos::PostRow;
use crate::services::posts::PostWithComments;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostContentRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostRow> for PostResponse {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

impl From<PostWithComments> for PostDetailResponse {
    fn from(p: PostWithComments) -> Self {
        Self {
            post: p.post.into(),
            comments: p.comments.into_iter().map(Into::into).collect(),
        }
    }
}

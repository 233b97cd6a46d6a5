use std::sync::Arc;

use tracing::info;

use crate::error::AppError;
use crate::repos::{CommentRow, CommentStore, PostStore, RepoError, ResourceStore};
use crate::services::ownership::{PostScopedComments, ResourceKind, authorize};
use crate::services::{internal, validation};

/// Comments always addressed through their parent post.
#[derive(Clone)]
pub struct CommentService {
    posts: Arc<dyn PostStore>,
    comments: Arc<dyn CommentStore>,
}

impl CommentService {
    pub fn new(posts: Arc<dyn PostStore>, comments: Arc<dyn CommentStore>) -> Self {
        Self { posts, comments }
    }

    pub async fn create(
        &self,
        caller_id: i64,
        post_id: i64,
        content: &str,
    ) -> Result<CommentRow, AppError> {
        validation::content(content)?;
        self.ensure_post(post_id).await?;

        let comment = self
            .comments
            .create(post_id, caller_id, content.trim())
            .await
            .map_err(|e| match e {
                // parent removed after the existence check
                RepoError::MissingReference => AppError::not_found(ResourceKind::Post.label()),
                other => internal(other, "failed to create comment"),
            })?;

        info!(
            user_id = caller_id,
            post_id,
            comment_id = comment.id,
            "comment created"
        );
        Ok(comment)
    }

    pub async fn list(
        &self,
        post_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentRow>, AppError> {
        self.ensure_post(post_id).await?;
        self.comments
            .list_by_post(post_id, limit, offset)
            .await
            .map_err(|e| internal(e, "failed to list comments"))
    }

    pub async fn get(&self, post_id: i64, comment_id: i64) -> Result<CommentRow, AppError> {
        self.scoped(post_id)
            .find_by_id(comment_id)
            .await
            .map_err(|e| internal(e, "failed to fetch comment"))?
            .ok_or_else(|| AppError::not_found(ResourceKind::Comment.label()))
    }

    pub async fn update(
        &self,
        caller_id: i64,
        post_id: i64,
        comment_id: i64,
        content: &str,
    ) -> Result<CommentRow, AppError> {
        validation::content(content)?;
        authorize::<CommentRow, _>(
            caller_id,
            &self.scoped(post_id),
            comment_id,
            ResourceKind::Comment,
        )
        .await?;

        self.comments
            .update(comment_id, content.trim())
            .await
            .map_err(|e| internal(e, "failed to update comment"))?
            .ok_or_else(|| AppError::not_found(ResourceKind::Comment.label()))
    }

    pub async fn delete(
        &self,
        caller_id: i64,
        post_id: i64,
        comment_id: i64,
    ) -> Result<(), AppError> {
        authorize::<CommentRow, _>(
            caller_id,
            &self.scoped(post_id),
            comment_id,
            ResourceKind::Comment,
        )
        .await?;

        let deleted = self
            .comments
            .delete(comment_id)
            .await
            .map_err(|e| internal(e, "failed to delete comment"))?;
        if !deleted {
            return Err(AppError::not_found(ResourceKind::Comment.label()));
        }

        info!(user_id = caller_id, post_id, comment_id, "comment deleted");
        Ok(())
    }

    fn scoped(&self, post_id: i64) -> PostScopedComments<'_> {
        PostScopedComments {
            post_id,
            comments: self.comments.as_ref(),
        }
    }

    async fn ensure_post(&self, post_id: i64) -> Result<(), AppError> {
        self.posts
            .find_by_id(post_id)
            .await
            .map_err(|e| internal(e, "failed to fetch post"))?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(ResourceKind::Post.label()))
    }
}

use std::sync::Arc;

use tracing::info;

use crate::error::AppError;
use crate::repos::{CommentRow, CommentStore, PostRow, PostStore};
use crate::services::ownership::{ResourceKind, authorize};
use crate::services::{internal, validation};

/// Comments shown with a single post.
const EMBEDDED_COMMENTS: i64 = 100;

#[derive(Debug, Clone)]
pub struct PostWithComments {
    pub post: PostRow,
    pub comments: Vec<CommentRow>,
}

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
    comments: Arc<dyn CommentStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, comments: Arc<dyn CommentStore>) -> Self {
        Self { posts, comments }
    }

    pub async fn create(&self, caller_id: i64, content: &str) -> Result<PostRow, AppError> {
        validation::content(content)?;

        let post = self
            .posts
            .create(caller_id, content.trim())
            .await
            .map_err(|e| internal(e, "failed to create post"))?;

        info!(user_id = caller_id, post_id = post.id, "post created");
        Ok(post)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<PostRow>, AppError> {
        self.posts
            .list(limit, offset)
            .await
            .map_err(|e| internal(e, "failed to list posts"))
    }

    pub async fn get(&self, post_id: i64) -> Result<PostWithComments, AppError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await
            .map_err(|e| internal(e, "failed to fetch post"))?
            .ok_or_else(|| AppError::not_found(ResourceKind::Post.label()))?;

        let comments = self
            .comments
            .list_by_post(post_id, EMBEDDED_COMMENTS, 0)
            .await
            .map_err(|e| internal(e, "failed to list comments"))?;

        Ok(PostWithComments { post, comments })
    }

    pub async fn update(
        &self,
        caller_id: i64,
        post_id: i64,
        content: &str,
    ) -> Result<PostRow, AppError> {
        validation::content(content)?;
        authorize::<PostRow, _>(caller_id, self.posts.as_ref(), post_id, ResourceKind::Post)
            .await?;

        // Deleted between the check and the write.
        self.posts
            .update(post_id, content.trim())
            .await
            .map_err(|e| internal(e, "failed to update post"))?
            .ok_or_else(|| AppError::not_found(ResourceKind::Post.label()))
    }

    pub async fn delete(&self, caller_id: i64, post_id: i64) -> Result<(), AppError> {
        authorize::<PostRow, _>(caller_id, self.posts.as_ref(), post_id, ResourceKind::Post)
            .await?;

        let deleted = self
            .posts
            .delete(post_id)
            .await
            .map_err(|e| internal(e, "failed to delete post"))?;
        if !deleted {
            return Err(AppError::not_found(ResourceKind::Post.label()));
        }

        info!(user_id = caller_id, post_id, "post deleted");
        Ok(())
    }
}

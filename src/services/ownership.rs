//! Ownership check for mutations on user-owned rows.
//!
//! Existence is always resolved before ownership: a missing id is `NotFound`
//! for every caller, and `Forbidden` is only ever returned for a row that exists.
use async_trait::async_trait;
use tracing::{error, warn};

use crate::error::AppError;
use crate::repos::{CommentRow, CommentStore, Owned, RepoResult, ResourceStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Post,
    Comment,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Post => "post",
            ResourceKind::Comment => "comment",
        }
    }
}

/// Fetch `id` from `store` and allow it only for its owner.
///
/// Returns the fetched row so callers don't need a second lookup.
pub async fn authorize<R, S>(
    caller_id: i64,
    store: &S,
    id: i64,
    kind: ResourceKind,
) -> Result<R, AppError>
where
    R: Owned + Send,
    S: ResourceStore<R> + ?Sized,
{
    let resource = store
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!(error = %e, resource = kind.label(), id, "failed to fetch resource");
            AppError::Internal
        })?
        .ok_or_else(|| AppError::not_found(kind.label()))?;

    if resource.owner_id() != caller_id {
        warn!(
            user_id = caller_id,
            owner_id = resource.owner_id(),
            resource = kind.label(),
            id,
            "ownership check failed"
        );
        return Err(AppError::forbidden(kind.label()));
    }

    Ok(resource)
}

/// Comment lookup restricted to one parent post.
///
/// A comment addressed under a post it does not belong to reads as absent.
pub struct PostScopedComments<'a> {
    pub post_id: i64,
    pub comments: &'a dyn CommentStore,
}

#[async_trait]
impl ResourceStore<CommentRow> for PostScopedComments<'_> {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<CommentRow>> {
        let comment = self.comments.find_by_id(id).await?;
        Ok(comment.filter(|c| c.post_id == self.post_id))
    }
}

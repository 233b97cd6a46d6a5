//! Shared lookup contract for user-owned rows (posts, comments).
use async_trait::async_trait;

use crate::repos::error::RepoResult;

/// A row that belongs to exactly one user.
pub trait Owned {
    fn owner_id(&self) -> i64;
}

/// Fetch a single owned row by id. `Ok(None)` is the not-found signal.
#[async_trait]
pub trait ResourceStore<R>: Send + Sync
where
    R: Owned + Send,
{
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<R>>;
}

/*
 * Responsibility
 * - comments CRUD (CommentStore の Postgres 実装)
 * - post_id / user_id の FK (CASCADE) 前提
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::{
    error::{RepoError, RepoResult},
    resource::{Owned, ResourceStore},
};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for CommentRow {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

#[async_trait]
pub trait CommentStore: ResourceStore<CommentRow> {
    async fn list_by_post(
        &self,
        post_id: i64,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<CommentRow>>;

    async fn create(&self, post_id: i64, user_id: i64, content: &str) -> RepoResult<CommentRow>;

    async fn update(&self, id: i64, content: &str) -> RepoResult<Option<CommentRow>>;

    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgCommentRepo {
    pool: PgPool,
}

impl PgCommentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore<CommentRow> for PgCommentRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<CommentRow>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, user_id, content, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }
}

#[async_trait]
impl CommentStore for PgCommentRepo {
    async fn list_by_post(
        &self,
        post_id: i64,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<CommentRow>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, user_id, content, created_at, updated_at
            FROM comments
            WHERE post_id = $1
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(post_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows)
    }

    async fn create(&self, post_id: i64, user_id: i64, content: &str) -> RepoResult<CommentRow> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (post_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, user_id, content, created_at, updated_at
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn update(&self, id: i64, content: &str) -> RepoResult<Option<CommentRow>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments
            SET
                content = $2,
                updated_at = now()
            WHERE id = $1
            RETURNING id, post_id, user_id, content, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}

/*
 * Responsibility
 * - posts CRUD (PostStore の Postgres 実装)
 * - user_id の FK (CASCADE) 前提で削除挙動を意識
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::{
    error::{RepoError, RepoResult},
    resource::{Owned, ResourceStore},
};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PostRow {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for PostRow {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

#[async_trait]
pub trait PostStore: ResourceStore<PostRow> {
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<PostRow>>;

    // FK violation on user_id surfaces as `RepoError::MissingReference`.
    async fn create(&self, user_id: i64, content: &str) -> RepoResult<PostRow>;

    async fn update(&self, id: i64, content: &str) -> RepoResult<Option<PostRow>>;

    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgPostRepo {
    pool: PgPool,
}

impl PgPostRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore<PostRow> for PgPostRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<PostRow>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, content, created_at, updated_at
            FROM posts
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
impl PostStore for PgPostRepo {
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<PostRow>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, content, created_at, updated_at
            FROM posts
            ORDER BY id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows)
    }

    async fn create(&self, user_id: i64, content: &str) -> RepoResult<PostRow> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (user_id, content)
            VALUES ($1, $2)
            RETURNING id, user_id, content, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn update(&self, id: i64, content: &str) -> RepoResult<Option<PostRow>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET
                content = $2,
                updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, content, created_at, updated_at
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
            DELETE FROM posts
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

/*
 * Responsibility
 * - users テーブル向け SQLx 操作 (CredentialStore の Postgres 実装)
 * - 見つからない場合は Ok(None) で返す (not-found はエラーではない)
 * - DB エラーは RepoError に変換して返す
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

#[derive(Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for UserRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the password hash
        f.debug_struct("UserRow")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("created_at", &self.created_at)
            .field("last_login", &self.last_login)
            .finish()
    }
}

/// Insert payload. `password_hash` is already hashed by the caller.
#[derive(Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>>;

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRow>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserRow>>;

    // Unique violation (email/username) must surface as `RepoError::Conflict`.
    async fn insert(&self, user: &NewUser) -> RepoResult<UserRow>;

    async fn update_profile(&self, id: i64, update: &ProfileUpdate)
    -> RepoResult<Option<UserRow>>;

    async fn record_last_login(&self, id: i64, at: DateTime<Utc>) -> RepoResult<()>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = r#"
    id, first_name, last_name, username, email, password,
    created_at, updated_at, last_login
"#;

#[async_trait]
impl CredentialStore for PgUserRepo {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRow>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserRow>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn insert(&self, user: &NewUser) -> RepoResult<UserRow> {
        let sql = format!(
            r#"
            INSERT INTO users (first_name, last_name, username, email, password)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn update_profile(
        &self,
        id: i64,
        update: &ProfileUpdate,
    ) -> RepoResult<Option<UserRow>> {
        let sql = format!(
            r#"
            UPDATE users
            SET
                first_name = $2,
                last_name = $3,
                username = $4,
                email = $5,
                updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(&update.first_name)
            .bind(&update.last_name)
            .bind(&update.username)
            .bind(&update.email)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn record_last_login(&self, id: i64, at: DateTime<Utc>) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_login = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(())
    }
}

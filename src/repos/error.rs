/*
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - 一意制約違反 / 外部キー違反だけは意味を付けて返す
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("conflict")]
    Conflict,
    #[error("missing reference")]
    MissingReference,
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e {
            match dbe.code().as_deref() {
                Some("23505") => return RepoError::Conflict,
                Some("23503") => return RepoError::MissingReference,
                _ => {}
            }
        }
        RepoError::Db(e)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::UserRow;

/// Identity snapshot carried inside every session token.
///
/// Taken from the user row at issue time; it is not refreshed from the store
/// afterwards, so profile edits only show up in tokens issued by a new login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&UserRow> for UserClaims {
    fn from(row: &UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username.clone(),
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            email: row.email.clone(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Signed token payload: the user snapshot plus registered claims.
///
/// Access and refresh tokens share this shape and differ only in `exp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub user: UserClaims,
    pub iss: String,
    pub aud: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    // audit/log correlation only (no denylist)
    pub jti: String,
}

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::{AppError, DUPLICATE_ACCOUNT, INVALID_CREDENTIALS};
use crate::repos::{CredentialStore, NewUser, RepoError, UserRow};
use crate::services::auth::{claims::UserClaims, jwt::TokenCodec};
use crate::services::password::PasswordHasher;
use crate::services::validation;

/// Account creation input (plaintext password, not yet validated).
#[derive(Clone)]
pub struct SignupCandidate {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupCandidate {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::name("first_name", &self.first_name)?;
        validation::name("last_name", &self.last_name)?;
        validation::email(&self.email)?;
        validation::username(&self.username)?;
        validation::password(&self.password)
    }
}

#[derive(Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::email(&self.email)?;
        validation::password(&self.password)
    }
}

/// Outward view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&UserRow> for UserProfile {
    fn from(row: &UserRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            username: row.username.clone(),
            email: row.email.clone(),
            created_at: row.created_at,
            updated_at: row.updated_at,
            last_login: row.last_login,
        }
    }
}

/// Result of signup/login: the user plus a fresh access/refresh pair.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
pub struct IssuedAccess {
    pub access_token: String,
    pub expires_in: u64,
}

/// Issues sessions for password credentials.
///
/// - signup: validate -> email lookup -> username lookup -> hash -> insert -> tokens
/// - login: validate -> email lookup -> constant-time verify -> tokens -> last_login (best effort)
/// - refresh: verify refresh token -> new access token from the embedded snapshot
#[derive(Clone)]
pub struct SessionService {
    users: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    codec: Arc<TokenCodec>,
    access_ttl_seconds: u64,
    refresh_ttl_seconds: u64,
    /// Verified against on unknown emails so both login failures cost one hash check.
    decoy_hash: Option<String>,
}

const DECOY_PASSWORD: &str = "decoy-password-never-issued";

impl SessionService {
    pub fn new(
        users: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<TokenCodec>,
        access_ttl_seconds: u64,
        refresh_ttl_seconds: u64,
    ) -> Self {
        let decoy_hash = hasher
            .hash(DECOY_PASSWORD)
            .map_err(|e| warn!(error = %e, "failed to prepare decoy password hash"))
            .ok();
        Self {
            users,
            hasher,
            codec,
            access_ttl_seconds,
            refresh_ttl_seconds,
            decoy_hash,
        }
    }

    pub fn access_ttl_seconds(&self) -> u64 {
        self.access_ttl_seconds
    }

    pub fn refresh_ttl_seconds(&self) -> u64 {
        self.refresh_ttl_seconds
    }

    pub async fn signup(&self, candidate: SignupCandidate) -> Result<IssuedSession, AppError> {
        candidate.validate()?;

        // Email is always checked first; username is only looked at when the email is free.
        let by_email = self.users.find_by_email(&candidate.email).await.map_err(|e| {
            error!(error = %e, "failed to look up user by email");
            AppError::Internal
        })?;
        if by_email.is_some() {
            info!("signup rejected: email already registered");
            return Err(AppError::Conflict(DUPLICATE_ACCOUNT));
        }

        let by_username = self
            .users
            .find_by_username(&candidate.username)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to look up user by username");
                AppError::Internal
            })?;
        if by_username.is_some() {
            info!("signup rejected: username already taken");
            return Err(AppError::Conflict(DUPLICATE_ACCOUNT));
        }

        let password_hash = self.hasher.hash(&candidate.password).map_err(|e| {
            error!(error = %e, "failed to hash password");
            AppError::Internal
        })?;

        let new_user = NewUser {
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            username: candidate.username,
            email: candidate.email,
            password_hash,
        };

        // The unique constraint decides concurrent signups that both passed the pre-check.
        let row = self.users.insert(&new_user).await.map_err(|e| match e {
            RepoError::Conflict => AppError::Conflict(DUPLICATE_ACCOUNT),
            other => {
                error!(error = %other, "failed to insert user");
                AppError::Internal
            }
        })?;

        let (access_token, refresh_token) = self.issue_pair(&UserClaims::from(&row))?;
        info!(user_id = row.id, "user signed up");

        Ok(IssuedSession {
            user: UserProfile::from(&row),
            access_token,
            refresh_token,
        })
    }

    pub async fn login(&self, credentials: LoginCredentials) -> Result<IssuedSession, AppError> {
        credentials.validate()?;

        let row = self
            .users
            .find_by_email(&credentials.email)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to look up user by email");
                AppError::Internal
            })?;

        // Unknown email and wrong password must be indistinguishable.
        let row = match row {
            Some(row) if self.hasher.verify(&row.password_hash, &credentials.password) => row,
            Some(row) => {
                warn!(user_id = row.id, "login rejected: password mismatch");
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS));
            }
            None => {
                if let Some(decoy) = &self.decoy_hash {
                    self.hasher.verify(decoy, &credentials.password);
                }
                warn!("login rejected: unknown email");
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS));
            }
        };

        let (access_token, refresh_token) = self.issue_pair(&UserClaims::from(&row))?;

        let mut user = UserProfile::from(&row);
        let now = Utc::now();
        match self.users.record_last_login(row.id, now).await {
            Ok(()) => user.last_login = Some(now),
            Err(e) => warn!(user_id = row.id, error = %e, "failed to record last login"),
        }

        info!(user_id = row.id, "user logged in");
        Ok(IssuedSession {
            user,
            access_token,
            refresh_token,
        })
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The new token carries the snapshot embedded in the refresh token; the
    /// store is not consulted, and the refresh token stays valid until it expires.
    pub fn refresh(&self, refresh_token: &str) -> Result<IssuedAccess, AppError> {
        let claims = self.codec.verify(refresh_token)?;
        let access_token = self.codec.sign(&claims.user, self.access_ttl_seconds)?;

        info!(user_id = claims.user.id, "access token refreshed");
        Ok(IssuedAccess {
            access_token,
            expires_in: self.access_ttl_seconds,
        })
    }

    fn issue_pair(&self, user: &UserClaims) -> Result<(String, String), AppError> {
        let access = self.codec.sign(user, self.access_ttl_seconds)?;
        let refresh = self.codec.sign(user, self.refresh_ttl_seconds)?;
        Ok((access, refresh))
    }
}

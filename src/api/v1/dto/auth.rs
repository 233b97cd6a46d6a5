/*
 * Responsibility
 * - signup / login / refresh の request/response DTO
 * - 欠けた field は空文字として受け取り、service 側の validation で field 付きエラーにする
 */
use serde::{Deserialize, Serialize};

use crate::services::auth::{
    IssuedAccess, IssuedSession, LoginCredentials, SignupCandidate, UserProfile,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<SignupRequest> for SignupCandidate {
    fn from(req: SignupRequest) -> Self {
        Self {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            username: req.username.trim().to_string(),
            email: req.email.trim().to_string(),
            password: req.password,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for LoginCredentials {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email.trim().to_string(),
            password: req.password,
        }
    }
}

/// Body form of the refresh call; used when the cookie is absent or rejected.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

impl SessionResponse {
    pub fn new(session: IssuedSession, expires_in: u64) -> Self {
        Self {
            user: session.user,
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            token_type: "Bearer",
            expires_in,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

impl From<IssuedAccess> for AccessTokenResponse {
    fn from(issued: IssuedAccess) -> Self {
        Self {
            access_token: issued.access_token,
            token_type: "Bearer",
            expires_in: issued.expires_in,
        }
    }
}

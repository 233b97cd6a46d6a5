/*
 * Responsibility
 * - /auth/signup, /auth/login, /auth/refresh, /auth/logout
 * - token は body と cookie の両方で返す (cookie 属性は cookies.rs)
 * - logout は cookie を消すだけ (発行済み token の失効はしない)
 */
use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    api::v1::{
        cookies::{self, REFRESH_COOKIE},
        dto::auth::{
            AccessTokenResponse, LoginRequest, RefreshRequest, SessionResponse, SignupRequest,
        },
        extractors::JsonBody,
    },
    error::{AppError, INVALID_TOKEN},
    state::AppState,
};

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<SessionResponse>), AppError> {
    let session = state.sessions.signup(req.into()).await?;

    let jar = cookies::with_session(
        jar,
        &state.cookies,
        &session.access_token,
        &session.refresh_token,
    );
    let body = SessionResponse::new(session, state.sessions.access_ttl_seconds());
    Ok((StatusCode::CREATED, jar, Json(body)))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    let session = state.sessions.login(req.into()).await?;

    let jar = cookies::with_session(
        jar,
        &state.cookies,
        &session.access_token,
        &session.refresh_token,
    );
    let body = SessionResponse::new(session, state.sessions.access_ttl_seconds());
    Ok((jar, Json(body)))
}

/// Refresh token from the `refresh_token` cookie, else from `{"refresh_token": ...}`.
///
/// A cookie that fails verification falls back to the body token when one was sent.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<AccessTokenResponse>), AppError> {
    let cookie_token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty());

    let issued = match cookie_token {
        Some(token) => match state.sessions.refresh(&token) {
            Ok(issued) => issued,
            Err(err) if body.is_empty() => return Err(err),
            Err(_) => {
                tracing::debug!("refresh cookie rejected, trying body token");
                state.sessions.refresh(&refresh_token_from_body(&body)?)?
            }
        },
        None => state.sessions.refresh(&refresh_token_from_body(&body)?)?,
    };

    let jar = cookies::with_access(jar, &state.cookies, &issued.access_token);
    Ok((jar, Json(issued.into())))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (StatusCode, CookieJar) {
    (StatusCode::NO_CONTENT, cookies::cleared(jar, &state.cookies))
}

fn refresh_token_from_body(body: &Bytes) -> Result<String, AppError> {
    if body.is_empty() {
        return Err(AppError::Unauthorized(INVALID_TOKEN));
    }
    let req: RefreshRequest = serde_json::from_slice(body)
        .map_err(|_| AppError::validation("refresh_token", "invalid request body"))?;

    req.refresh_token
        .filter(|t| !t.trim().is_empty())
        .ok_or(AppError::Unauthorized(INVALID_TOKEN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_from_body() {
        let body = Bytes::from_static(br#"{"refresh_token":"abc"}"#);
        assert_eq!(refresh_token_from_body(&body).unwrap(), "abc");
    }

    #[test]
    fn test_missing_refresh_token_is_unauthorized() {
        let bodies: [&[u8]; 3] = [b"", br#"{}"#, br#"{"refresh_token":""}"#];
        for body in bodies {
            assert_eq!(
                refresh_token_from_body(&Bytes::copy_from_slice(body)).unwrap_err(),
                AppError::Unauthorized(INVALID_TOKEN)
            );
        }
    }

    #[test]
    fn test_malformed_refresh_body_is_validation_error() {
        let err = refresh_token_from_body(&Bytes::from_static(b"not json")).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation {
                field: "refresh_token",
                ..
            }
        ));
    }
}

//! access token 検証 → AuthCtx を extensions に入れる
//!
//! - token は `Authorization: Bearer <jwt>`、なければ `access_token` cookie から取る
//! - 署名 / alg / iss / aud / exp の検証は TokenCodec 側で実施
//! - 失敗時は handler に到達させずに 401 を返す (理由はログにだけ残す)

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::v1::cookies::ACCESS_COOKIE;
use crate::api::v1::extractors::AuthCtx;
use crate::error::{AppError, INVALID_TOKEN};
use crate::services::auth::TokenCodec;

/// Verify `token` and turn its claims into the per-request identity.
pub fn authenticate(codec: &TokenCodec, token: &str) -> Result<AuthCtx, AppError> {
    codec.verify(token).map(AuthCtx::from)
}

/// 認証が必要な route 群に middleware を適用する。
///
/// 例：
/// ```ignore
/// let protected = middleware::auth::access::apply(protected, state.codec.clone());
/// ```
pub fn apply<S>(router: Router<S>, codec: Arc<TokenCodec>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(codec, access_middleware))
}

async fn access_middleware(
    State(codec): State<Arc<TokenCodec>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = match presented_token(req.headers()) {
        Some(token) => token,
        None => {
            tracing::debug!(path = %req.uri().path(), "no access token presented");
            return Err(AppError::Unauthorized(INVALID_TOKEN));
        }
    };

    let auth_ctx = match authenticate(&codec, &token) {
        Ok(ctx) => ctx,
        Err(err) => {
            tracing::warn!(error = ?err, path = %req.uri().path(), "access token rejected");
            return Err(err);
        }
    };

    tracing::debug!(user_id = auth_ctx.user_id, jti = %auth_ctx.jti, "authenticated");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}

fn presented_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

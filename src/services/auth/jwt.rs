use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error};
use uuid::Uuid;

use crate::config::ConfigError;
use crate::error::{AppError, INVALID_TOKEN};
use crate::services::auth::claims::{SessionClaims, UserClaims};

/// HS256 signer/verifier for session tokens.
///
/// The secret is injected once at construction and never leaves this type.
/// Only HS256 is accepted on verify, so tokens declaring any other algorithm
/// (including `none`) are rejected before the signature is looked at.
#[derive(Clone)]
pub struct TokenCodec {
    issuer: String,
    audience: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenCodec")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(
        secret: &str,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        leeway_seconds: u64,
    ) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }
        let issuer = issuer.into();
        let audience = audience.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_audience(&[audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = leeway_seconds;

        Ok(Self {
            issuer,
            audience,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Sign `user` into a token that expires `ttl_seconds` from now.
    pub fn sign(&self, user: &UserClaims, ttl_seconds: u64) -> Result<String, AppError> {
        self.sign_at(user, ttl_seconds, Utc::now())
    }

    /// Same as [`sign`](Self::sign) with an explicit issue time.
    pub fn sign_at(
        &self,
        user: &UserClaims,
        ttl_seconds: u64,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let iat = issued_at.timestamp();
        let ttl = i64::try_from(ttl_seconds).map_err(|_| {
            error!(ttl_seconds, "token ttl out of range");
            AppError::Internal
        })?;

        let claims = SessionClaims {
            user: user.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: user.id.to_string(),
            iat,
            exp: iat.saturating_add(ttl),
            jti: Uuid::new_v4().to_string(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, user_id = user.id, "failed to sign JWT");
            AppError::Internal
        })
    }

    /// Verify signature, algorithm, issuer/audience and expiry.
    ///
    /// Every failure collapses to the same `Unauthorized`; the reason is only
    /// logged.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "token verification failed");
                AppError::Unauthorized(INVALID_TOKEN)
            })?;

        let claims = data.claims;
        if claims.sub != claims.user.id.to_string() {
            debug!(sub = %claims.sub, user_id = claims.user.id, "token sub does not match id");
            return Err(AppError::Unauthorized(INVALID_TOKEN));
        }

        Ok(claims)
    }
}

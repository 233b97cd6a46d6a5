/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - 署名/期限の検証は middleware/services 側の責務
 * - 中身は token 発行時点のスナップショット (store から引き直さない)
 */
use crate::services::auth::SessionClaims;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は users.id (所有者チェックに使うのはこれだけ)
/// - `jti` は監査/相関用 (denylist は持たない)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub jti: String,
    pub expires_at: i64,
}

impl From<SessionClaims> for AuthCtx {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.user.id,
            username: claims.user.username,
            email: claims.user.email,
            first_name: claims.user.first_name,
            last_name: claims.user.last_name,
            jti: claims.jti,
            expires_at: claims.exp,
        }
    }
}

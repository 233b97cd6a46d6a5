/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: access token 検証 (SessionAuthenticator)
 * - http / cors / security_headers: 全 route 共通の transport 層
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;

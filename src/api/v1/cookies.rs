/*
 * Responsibility
 * - session cookie (access_token / refresh_token) の組み立てと削除
 * - 属性: HttpOnly; Path=/; SameSite=Lax; Max-Age (+ production では Secure)
 */
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::state::CookiePolicy;

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

fn session_cookie(
    name: &'static str,
    value: &str,
    max_age: u64,
    secure: bool,
) -> Option<Cookie<'static>> {
    let secure = if secure { "; Secure" } else { "" };
    Cookie::parse(format!(
        "{name}={value}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age}{secure}"
    ))
    .ok()
}

fn add(jar: CookieJar, cookie: Option<Cookie<'static>>) -> CookieJar {
    match cookie {
        Some(cookie) => jar.add(cookie),
        None => {
            tracing::error!("failed to build session cookie");
            jar
        }
    }
}

pub fn with_access(jar: CookieJar, policy: &CookiePolicy, token: &str) -> CookieJar {
    add(
        jar,
        session_cookie(ACCESS_COOKIE, token, policy.access_max_age, policy.secure),
    )
}

pub fn with_session(
    jar: CookieJar,
    policy: &CookiePolicy,
    access_token: &str,
    refresh_token: &str,
) -> CookieJar {
    let jar = with_access(jar, policy, access_token);
    add(
        jar,
        session_cookie(
            REFRESH_COOKIE,
            refresh_token,
            policy.refresh_max_age,
            policy.secure,
        ),
    )
}

/// Expire both cookies. Tokens already handed out stay valid until `exp`.
pub fn cleared(jar: CookieJar, policy: &CookiePolicy) -> CookieJar {
    let jar = add(jar, session_cookie(ACCESS_COOKIE, "", 0, policy.secure));
    add(jar, session_cookie(REFRESH_COOKIE, "", 0, policy.secure))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(secure: bool) -> CookiePolicy {
        CookiePolicy {
            secure,
            access_max_age: 900,
            refresh_max_age: 86_400,
        }
    }

    #[test]
    fn test_session_cookies_carry_attributes() {
        let jar = with_session(CookieJar::new(), &policy(false), "acc", "ref");

        let access = jar.get(ACCESS_COOKIE).unwrap();
        assert_eq!(access.value(), "acc");
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.path(), Some("/"));
        assert_eq!(access.max_age().map(|d| d.whole_seconds()), Some(900));
        assert_ne!(access.secure(), Some(true));

        let refresh = jar.get(REFRESH_COOKIE).unwrap();
        assert_eq!(refresh.max_age().map(|d| d.whole_seconds()), Some(86_400));
    }

    #[test]
    fn test_production_cookies_are_secure() {
        let jar = with_access(CookieJar::new(), &policy(true), "acc");
        assert_eq!(jar.get(ACCESS_COOKIE).unwrap().secure(), Some(true));
    }

    #[test]
    fn test_cleared_cookies_expire_immediately() {
        let jar = cleared(CookieJar::new(), &policy(false));
        let access = jar.get(ACCESS_COOKIE).unwrap();
        assert_eq!(access.value(), "");
        assert_eq!(access.max_age().map(|d| d.whole_seconds()), Some(0));
    }
}

use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;
use time::Duration;

use crate::domain::user::models::RequestCredentials;
use crate::domain::user::models::TokenPair;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// How session cookies are emitted.
#[derive(Debug, Clone, Copy)]
pub struct CookieSettings {
    pub max_age: Duration,
    pub secure: bool,
}

impl CookieSettings {
    pub fn new(max_age_hours: i64, secure: bool) -> Self {
        Self {
            max_age: Duration::hours(max_age_hours),
            secure,
        }
    }
}

fn session_cookie(name: &'static str, value: String, settings: &CookieSettings) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(settings.max_age)
        .build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .http_only(true)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

/// Add both session cookies carrying `tokens`.
pub fn with_session_cookies(jar: CookieJar, tokens: &TokenPair, settings: &CookieSettings) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_TOKEN_COOKIE,
        tokens.access_token.clone(),
        settings,
    ))
    .add(session_cookie(
        REFRESH_TOKEN_COOKIE,
        tokens.refresh_token.clone(),
        settings,
    ))
}

/// Expire both session cookies on the client.
pub fn without_session_cookies(jar: CookieJar) -> CookieJar {
    jar.add(removal_cookie(ACCESS_TOKEN_COOKIE))
        .add(removal_cookie(REFRESH_TOKEN_COOKIE))
}

/// Read whatever session cookies the request carries.
pub fn request_credentials(jar: &CookieJar) -> RequestCredentials {
    RequestCredentials {
        access_token: jar
            .get(ACCESS_TOKEN_COOKIE)
            .map(|c| c.value().to_string()),
        refresh_token: jar
            .get(REFRESH_TOKEN_COOKIE)
            .map(|c| c.value().to_string()),
    }
}

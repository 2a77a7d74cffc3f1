//! Session cookie handling.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::SESSION_COOKIE_NAME;

/// Attributes applied to the session cookie
#[derive(Debug, Clone, Copy)]
pub struct SessionCookieConfig {
    /// Only send the cookie over HTTPS
    pub secure: bool,
}

impl SessionCookieConfig {
    /// Attach the session id to the response.
    pub fn set(&self, jar: CookieJar, session_id: String) -> CookieJar {
        jar.add(
            Cookie::build((SESSION_COOKIE_NAME, session_id))
                .path("/")
                .http_only(true)
                .secure(self.secure)
                .same_site(SameSite::Lax),
        )
    }

    /// Expire the session cookie on the client.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"))
    }
}

/// Session id presented by the client, if any.
pub fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

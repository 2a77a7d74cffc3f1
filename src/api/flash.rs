//! One-shot status messages carried in a cookie.
//!
//! A redirect stores a message; the next rendered page takes it and clears
//! the cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use crate::config::FLASH_COOKIE_NAME;

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Danger,
}

impl FlashLevel {
    fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Danger => "danger",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "success" => Some(FlashLevel::Success),
            "info" => Some(FlashLevel::Info),
            "danger" => Some(FlashLevel::Danger),
            _ => None,
        }
    }
}

/// A user-facing status message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Danger, message)
    }

    /// Put this message into the jar for the next page.
    pub fn store(self, jar: CookieJar) -> CookieJar {
        let value = format!("{}:{}", self.level.as_str(), self.message);
        jar.add(
            Cookie::build((FLASH_COOKIE_NAME, value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        )
    }

    /// Take the pending message, if any, and clear it from the jar.
    pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
        let flash = match jar.get(FLASH_COOKIE_NAME) {
            Some(cookie) => Self::decode(cookie.value()),
            None => return (jar, None),
        };
        let jar = jar.remove(Cookie::build(FLASH_COOKIE_NAME).path("/"));
        (jar, flash)
    }

    fn decode(raw: &str) -> Option<Flash> {
        let (level, message) = raw.split_once(':')?;
        Some(Flash::new(FlashLevel::parse(level)?, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_then_take() {
        let jar = Flash::success("Todo added!").store(CookieJar::new());
        let (jar, flash) = Flash::take(jar);

        assert_eq!(flash, Some(Flash::success("Todo added!")));
        assert!(jar.get(FLASH_COOKIE_NAME).is_none());
    }

    #[test]
    fn test_take_without_flash() {
        let (_, flash) = Flash::take(CookieJar::new());
        assert_eq!(flash, None);
    }

    #[test]
    fn test_message_may_contain_separator() {
        let flash = Flash::decode("danger:Due date: bad").unwrap();
        assert_eq!(flash.level, FlashLevel::Danger);
        assert_eq!(flash.message, "Due date: bad");
    }

    #[test]
    fn test_tampered_level_is_ignored() {
        assert_eq!(Flash::decode("evil:<script>"), None);
        assert_eq!(Flash::decode("no separator"), None);
    }
}

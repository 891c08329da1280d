//! Session cookie helpers.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::time::Duration;

use super::AppSettings;

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(settings: &AppSettings, token: String) -> Cookie<'static> {
    Cookie::build((settings.cookie_name.clone(), token))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::days(settings.token_ttl_days))
        .secure(settings.secure_cookies)
        .build()
}

/// Adds the session cookie to `jar`.
pub fn with_session(jar: CookieJar, settings: &AppSettings, token: String) -> CookieJar {
    jar.add(session_cookie(settings, token))
}

/// Expires the session cookie.
pub fn without_session(jar: CookieJar, settings: &AppSettings) -> CookieJar {
    jar.remove(Cookie::build(settings.cookie_name.clone()).path("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn settings(secure: bool) -> AppSettings {
        AppSettings {
            cookie_name: "token".to_string(),
            secure_cookies: secure,
            token_ttl_days: 7,
            currency: "INR".to_string(),
            checkout_secret: Secret::new("k".to_string()),
            webhook_secret: Secret::new("w".to_string()),
            chat_history_window: 20,
            chat_session_ttl_days: 7,
        }
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie(&settings(false), "jwt".to_string());
        let rendered = cookie.to_string();

        assert!(rendered.starts_with("token=jwt"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Strict"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=604800"));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn production_cookie_is_secure() {
        let cookie = session_cookie(&settings(true), "jwt".to_string());
        assert_eq!(cookie.secure(), Some(true));
    }
}

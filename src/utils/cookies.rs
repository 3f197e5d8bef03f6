use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::app::AppConfig;
use crate::config::jwt::JwtConfig;

/// Name of the session cookie carrying the signed token.
pub const SESSION_COOKIE: &str = "jwt";

/// Build the http-only, same-site-strict session cookie. `Secure` is set
/// outside local development so the token never travels over plain HTTP.
pub fn session_cookie(
    token: String,
    jwt_config: &JwtConfig,
    app_config: &AppConfig,
) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(app_config.secure_cookies())
        .max_age(time::Duration::seconds(jwt_config.session_expiry))
        .build()
}

/// An immediately-expiring cookie with the same attributes, used on logout.
/// Logout is purely client-side state removal; tokens are stateless.
pub fn clear_session_cookie(app_config: &AppConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(app_config.secure_cookies())
        .max_age(time::Duration::ZERO)
        .build()
}

use std::env;

/// Deployment environment name used to decide cookie security attributes.
pub const DEVELOPMENT_ENV: &str = "development";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            environment: env::var("APP_ENV").unwrap_or_else(|_| DEVELOPMENT_ENV.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
        }
    }

    /// Session cookies are marked `Secure` everywhere except local development.
    pub fn secure_cookies(&self) -> bool {
        self.environment != DEVELOPMENT_ENV
    }
}

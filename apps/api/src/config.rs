use anyhow::{Context, Result};

/// Fallback signing secret for local development. `main` warns when it is in
/// effect.
pub const DEV_JWT_SECRET: &str = "dev-secret";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absent (or placeholder-valued) key puts the AI collaborator in
    /// deterministic canned mode.
    pub anthropic_api_key: Option<String>,
    pub jwt_secret: String,
    pub jwt_expires_in_hours: i64,
    pub port: u16,
    pub cors_allowed_origin: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty() && !k.contains("placeholder")),
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| DEV_JWT_SECRET.to_string()),
            jwt_expires_in_hours: std::env::var("JWT_EXPIRES_IN_HOURS")
                .unwrap_or_else(|_| "168".to_string())
                .parse::<i64>()
                .context("JWT_EXPIRES_IN_HOURS must be a whole number of hours")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            cors_allowed_origin: std::env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

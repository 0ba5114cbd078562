use std::path::PathBuf;

use thesis_core::aggregation::TotalScoreMethod;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Built once at start-up and shared through [`AppState`](crate::state::AppState);
/// handlers and workflows never read the environment themselves.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory exported score reports are written to.
    pub reports_dir: PathBuf,
    /// How a thesis total is derived from its scores.
    pub total_score_method: TotalScoreMethod,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `REPORTS_DIR`          | `./reports`                |
    /// | `TOTAL_SCORE_METHOD`   | `capped_sum`               |
    ///
    /// # Panics
    ///
    /// Panics on malformed values so misconfiguration fails at start-up.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let reports_dir = PathBuf::from(
            std::env::var("REPORTS_DIR").unwrap_or_else(|_| "./reports".into()),
        );

        let total_score_method = match std::env::var("TOTAL_SCORE_METHOD") {
            Ok(value) => TotalScoreMethod::from_str_value(value.trim())
                .unwrap_or_else(|e| panic!("TOTAL_SCORE_METHOD: {e}")),
            Err(_) => TotalScoreMethod::default(),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            reports_dir,
            total_score_method,
            jwt,
        }
    }
}

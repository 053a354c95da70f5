use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Deployment mode, selected by `APP_ENV`.
///
/// In development the photo service is backed by the bundled mock source
/// and never contacts the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn is_development(self) -> bool {
        self == AppEnv::Development
    }
}

impl FromStr for AppEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnv::Development),
            "production" | "prod" => Ok(AppEnv::Production),
            other => Err(format!("unknown APP_ENV '{other}'")),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development, except
/// the JWT secret which must always be provided.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Deployment mode (default: production).
    pub app_env: AppEnv,
    /// Upper bound on cached responses; `None` leaves the cache unbounded.
    pub cache_max_entries: Option<usize>,
    /// Interval for the stale-entry sweeper; `None` disables it.
    pub cache_sweep_secs: Option<u64>,
    /// JWT token configuration.
    pub jwt: JwtConfig,
}

/// Origins of the bundled web frontends' dev servers.
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173,http://localhost:5174";

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                                      |
    /// |---------------------------|----------------------------------------------|
    /// | `HOST`                    | `0.0.0.0`                                    |
    /// | `PORT`                    | `3001`                                       |
    /// | `CORS_ORIGINS`            | `http://localhost:3000,...:5173,...:5174`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                                         |
    /// | `APP_ENV`                 | `production`                                 |
    /// | `PHOTO_CACHE_MAX_ENTRIES` | unset (unbounded)                            |
    /// | `PHOTO_CACHE_SWEEP_SECS`  | `60` (`0` disables the sweeper)              |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let app_env: AppEnv = std::env::var("APP_ENV")
            .unwrap_or_else(|_| "production".into())
            .parse()
            .expect("APP_ENV must be 'development' or 'production'");

        let cache_max_entries = std::env::var("PHOTO_CACHE_MAX_ENTRIES").ok().map(|v| {
            v.parse::<usize>()
                .expect("PHOTO_CACHE_MAX_ENTRIES must be a valid usize")
        });

        let cache_sweep_secs: u64 = std::env::var("PHOTO_CACHE_SWEEP_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("PHOTO_CACHE_SWEEP_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            app_env,
            cache_max_entries: cache_max_entries.filter(|&n| n > 0),
            cache_sweep_secs: Some(cache_sweep_secs).filter(|&s| s > 0),
            jwt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_env_parses_common_spellings() {
        assert_eq!("development".parse::<AppEnv>(), Ok(AppEnv::Development));
        assert_eq!(" Dev ".parse::<AppEnv>(), Ok(AppEnv::Development));
        assert_eq!("PRODUCTION".parse::<AppEnv>(), Ok(AppEnv::Production));
        assert!("staging".parse::<AppEnv>().is_err());
    }
}

use std::time::Duration;

/// Default provider base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.unsplash.com";
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default `User-Agent` sent with every provider request.
pub const DEFAULT_USER_AGENT: &str = "Unsplash-Clone-App/1.0";

/// Connection settings for the Unsplash API.
#[derive(Debug, Clone)]
pub struct UnsplashConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Access key sent as the `client_id` query parameter.
    pub access_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Client-identifying `User-Agent` header value.
    pub user_agent: String,
}

impl UnsplashConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                     |
    /// |-------------------------|-----------------------------|
    /// | `UNSPLASH_ACCESS_KEY`   | empty                       |
    /// | `UNSPLASH_BASE_URL`     | `https://api.unsplash.com`  |
    /// | `UNSPLASH_TIMEOUT_SECS` | `10`                        |
    /// | `UNSPLASH_USER_AGENT`   | `Unsplash-Clone-App/1.0`    |
    ///
    /// An empty access key is accepted here; the binary refuses to start a
    /// live source without one.
    pub fn from_env() -> Self {
        let access_key = std::env::var("UNSPLASH_ACCESS_KEY").unwrap_or_default();

        let base_url = std::env::var("UNSPLASH_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs: u64 = std::env::var("UNSPLASH_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("UNSPLASH_TIMEOUT_SECS must be a valid u64");

        let user_agent =
            std::env::var("UNSPLASH_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.into());

        Self {
            base_url,
            access_key,
            timeout: Duration::from_secs(timeout_secs),
            user_agent,
        }
    }

    /// Config pointing at `base_url` with default timeout and user agent.
    pub fn new(base_url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key: access_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

use inkwell_core::points::DEFAULT_UNLOCK_COST;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
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
    /// Time allowed for background services to drain after the listener
    /// stops (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Lifetime of cached chapter lists used by access checks (default: `300`).
    pub access_cache_ttl_secs: u64,
    /// Pause between waitlist allocations within one run (default: `3000`).
    pub waitlist_pacing_ms: u64,
    /// Points charged to unlock a chapter (default: `100`).
    pub chapter_unlock_cost: i64,
    /// Reader page the unlock endpoint redirects to.
    pub reader_page_url: String,
}

fn env_or<T: std::str::FromStr>(key: &str, default: &str) -> T {
    std::env::var(key)
        .unwrap_or_else(|_| default.into())
        .parse()
        .unwrap_or_else(|_| panic!("{key} must be a valid {}", std::any::type_name::<T>()))
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                  |
    /// |-------------------------|--------------------------|
    /// | `HOST`                  | `0.0.0.0`                |
    /// | `PORT`                  | `3000`                   |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                     |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                     |
    /// | `ACCESS_CACHE_TTL_SECS` | `300`                    |
    /// | `WAITLIST_PACING_MS`    | `3000`                   |
    /// | `CHAPTER_UNLOCK_COST`   | `100`                    |
    /// | `READER_PAGE_URL`       | `chapter-reader.html`    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let reader_page_url =
            std::env::var("READER_PAGE_URL").unwrap_or_else(|_| "chapter-reader.html".into());

        Self {
            host,
            port: env_or("PORT", "3000"),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", "30"),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", "30"),
            access_cache_ttl_secs: env_or("ACCESS_CACHE_TTL_SECS", "300"),
            waitlist_pacing_ms: env_or("WAITLIST_PACING_MS", "3000"),
            chapter_unlock_cost: env_or("CHAPTER_UNLOCK_COST", &DEFAULT_UNLOCK_COST.to_string()),
            reader_page_url,
        }
    }
}

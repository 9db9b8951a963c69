/// Application configuration module
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub usgs_base_url: String,
    pub cache_namespace: String,
    pub cache_ttl_seconds: u64,
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?;

        let usgs_base_url = env::var("USGS_FEED_BASE_URL").unwrap_or_else(|_| {
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary".to_string()
        });

        let cache_namespace =
            env::var("CACHE_NAMESPACE").unwrap_or_else(|_| "usgs".to_string());

        let cache_ttl_seconds = env_u64("CACHE_TTL_SECONDS", 600); // 10 minutes

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);

        Ok(Self {
            database_url,
            usgs_base_url,
            cache_namespace,
            cache_ttl_seconds,
            port,
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

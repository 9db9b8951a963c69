/// Repository layer for database operations
use crate::errors::ApiResult;
use crate::services::FeedCache;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

/// Feed cache repository. TTL expiry is enforced by the store itself: `get`
/// filters on `expires_at` in SQL, so an expired row reads as absent without
/// any timestamp checks in application code.
#[derive(Clone)]
pub struct FeedCacheRepo {
    pool: PgPool,
}

impl FeedCacheRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedCache for FeedCacheRepo {
    /// Read a live cache entry; expired or missing keys return None.
    async fn get(&self, key: &str) -> ApiResult<Option<Value>> {
        let row = sqlx::query_as::<_, (Value,)>(
            "SELECT payload FROM feed_cache
             WHERE cache_key = $1 AND expires_at > now()",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(payload,)| payload))
    }

    /// Overwrite the entry for a key and restart its TTL countdown. Last
    /// write wins under concurrent callers.
    async fn set(&self, key: &str, payload: &Value, ttl_seconds: u64) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO feed_cache(cache_key, payload, fetched_at, expires_at)
             VALUES($1, $2, now(), now() + make_interval(secs => $3))
             ON CONFLICT (cache_key) DO UPDATE
             SET payload = EXCLUDED.payload,
                 fetched_at = EXCLUDED.fetched_at,
                 expires_at = EXCLUDED.expires_at",
        )
        .bind(key)
        .bind(payload)
        .bind(ttl_seconds as f64)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Initialize database tables
pub async fn init_db(pool: &PgPool) -> ApiResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS feed_cache(
            cache_key TEXT PRIMARY KEY,
            payload JSONB NOT NULL,
            fetched_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            expires_at TIMESTAMPTZ NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// HTTP request handlers
use crate::domain::{EarthquakeQuery, EarthquakeResponse, Health};
use crate::errors::ApiError;
use crate::services::EarthquakeService;
use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub earthquake_service: Arc<EarthquakeService>,
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Fetch and filter earthquake data. Validation runs before any cache or
/// network work so a bad request never touches the upstream feed.
pub async fn get_earthquake_data(
    State(state): State<AppState>,
    Json(query): Json<EarthquakeQuery>,
) -> Result<Json<EarthquakeResponse>, ApiError> {
    let (window, criteria) = query.validate()?;
    let response = state.earthquake_service.handle(window, &criteria).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeWindow;
    use crate::errors::ApiResult;
    use crate::services::{FeedCache, FeedOrigin};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingOrigin {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FeedOrigin for CountingOrigin {
        async fn fetch(&self, _window: TimeWindow) -> ApiResult<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "features": [] }))
        }
    }

    struct NoopCache;

    #[async_trait]
    impl FeedCache for NoopCache {
        async fn get(&self, _key: &str) -> ApiResult<Option<Value>> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _payload: &Value, _ttl: u64) -> ApiResult<()> {
            Ok(())
        }
    }

    fn state(origin: Arc<CountingOrigin>) -> AppState {
        AppState {
            earthquake_service: Arc::new(EarthquakeService::new(
                Arc::new(NoopCache),
                origin,
                "usgs".to_string(),
                600,
            )),
        }
    }

    #[tokio::test]
    async fn invalid_time_range_rejected_before_any_fetch() {
        let origin = Arc::new(CountingOrigin {
            calls: AtomicUsize::new(0),
        });
        let query = EarthquakeQuery {
            time_range: "decade".into(),
            ..Default::default()
        };

        let result = get_earthquake_data(State(state(origin.clone())), Json(query)).await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(origin.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn default_query_serves_successfully() {
        let origin = Arc::new(CountingOrigin {
            calls: AtomicUsize::new(0),
        });

        let Json(resp) =
            get_earthquake_data(State(state(origin.clone())), Json(EarthquakeQuery::default()))
                .await
                .unwrap();

        assert_eq!(resp.time_range, TimeWindow::Day);
        assert_eq!(resp.min_magnitude, 2.5);
        assert_eq!(resp.total_count, 0);
        assert_eq!(origin.calls.load(Ordering::SeqCst), 1);
    }
}

/// Business logic services layer
use crate::domain::{Earthquake, EarthquakeResponse, FilterCriteria, TimeWindow};
use crate::errors::ApiResult;
use crate::utils::{format_event_time, iso_utc, num};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

/// Upstream feed source. Implemented by `UsgsClient`; tests substitute fakes.
#[async_trait]
pub trait FeedOrigin: Send + Sync {
    async fn fetch(&self, window: TimeWindow) -> ApiResult<Value>;
}

/// Expiring key/value store for raw feed documents.
#[async_trait]
pub trait FeedCache: Send + Sync {
    /// Returns None for missing or expired keys; never errors for absence.
    async fn get(&self, key: &str) -> ApiResult<Option<Value>>;
    /// Overwrites any existing value and resets the TTL countdown.
    async fn set(&self, key: &str, payload: &Value, ttl_seconds: u64) -> ApiResult<()>;
}

/// Deterministic cache key for a namespace and time window.
pub fn cache_key(namespace: &str, window: TimeWindow) -> String {
    format!("{}:earthquakes:{}", namespace, window.as_str())
}

/// Filter, normalize, sort, and truncate raw feed features into earthquake
/// records. Pure function: same document and criteria always yield the same
/// output.
pub fn transform(raw: &Value, criteria: &FilterCriteria) -> (Vec<Earthquake>, usize) {
    let mut earthquakes = Vec::new();

    let features = raw.get("features").and_then(|f| f.as_array());
    for feature in features.into_iter().flatten() {
        let props = feature.get("properties");

        // Features without a magnitude are dropped; the bound is inclusive.
        let magnitude = match props.and_then(|p| p.get("mag")).and_then(num) {
            Some(m) if m >= criteria.min_magnitude => m,
            _ => continue,
        };

        let coords = feature
            .get("geometry")
            .and_then(|g| g.get("coordinates"))
            .and_then(|c| c.as_array());
        let coord = |i: usize| coords.and_then(|c| c.get(i)).and_then(num);

        let epoch_ms = props
            .and_then(|p| p.get("time"))
            .and_then(|t| t.as_i64())
            .unwrap_or(0);

        let prop_str = |key: &str| {
            props
                .and_then(|p| p.get(key))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        earthquakes.push(Earthquake {
            id: feature
                .get("id")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            magnitude,
            location: prop_str("place").unwrap_or_else(|| "Unknown location".to_string()),
            longitude: coord(0),
            latitude: coord(1),
            depth: coord(2),
            time: format_event_time(epoch_ms),
            url: prop_str("url").unwrap_or_default(),
            kind: prop_str("type").unwrap_or_else(|| "earthquake".to_string()),
        });
    }

    // Stable sort: ties keep their relative feed order.
    earthquakes.sort_by(|a, b| {
        b.magnitude
            .partial_cmp(&a.magnitude)
            .unwrap_or(Ordering::Equal)
    });
    earthquakes.truncate(criteria.max_results);

    let total = earthquakes.len();
    (earthquakes, total)
}

/// Request orchestrator: cache-aside read-through fetch plus the transform
/// pipeline, assembled into the response envelope.
pub struct EarthquakeService {
    cache: Arc<dyn FeedCache>,
    origin: Arc<dyn FeedOrigin>,
    namespace: String,
    cache_ttl_seconds: u64,
}

impl EarthquakeService {
    pub fn new(
        cache: Arc<dyn FeedCache>,
        origin: Arc<dyn FeedOrigin>,
        namespace: String,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            cache,
            origin,
            namespace,
            cache_ttl_seconds,
        }
    }

    /// Serve one filter request: check the cache, fetch from the origin on a
    /// miss, repopulate best-effort, then filter and assemble the envelope.
    pub async fn handle(
        &self,
        window: TimeWindow,
        criteria: &FilterCriteria,
    ) -> ApiResult<EarthquakeResponse> {
        info!(
            time_range = %window,
            min_magnitude = criteria.min_magnitude,
            max_results = criteria.max_results,
            "Processing earthquake data request"
        );

        let key = cache_key(&self.namespace, window);

        // An unreachable cache degrades to a miss; the request must still
        // succeed when the origin fetch does.
        let cached_doc = match self.cache.get(&key).await {
            Ok(Some(doc)) => {
                info!(time_range = %window, "Cache hit for earthquake data");
                Some(doc)
            }
            Ok(None) => {
                info!(time_range = %window, "Cache miss for earthquake data");
                None
            }
            Err(e) => {
                warn!(time_range = %window, error = %e, "Cache read failed, treating as miss");
                None
            }
        };

        let cached = cached_doc.is_some();
        let raw = match cached_doc {
            Some(doc) => doc,
            None => {
                let doc = self.origin.fetch(window).await?;
                // Cache population is best-effort and never fails the request.
                match self.cache.set(&key, &doc, self.cache_ttl_seconds).await {
                    Ok(()) => info!(
                        time_range = %window,
                        ttl = self.cache_ttl_seconds,
                        "Cached earthquake data"
                    ),
                    Err(e) => {
                        warn!(time_range = %window, error = %e, "Failed to populate feed cache")
                    }
                }
                doc
            }
        };

        let (earthquakes, total_count) = transform(&raw, criteria);
        info!(
            returned = total_count,
            min_mag = criteria.min_magnitude,
            "Filtered earthquakes"
        );

        Ok(EarthquakeResponse {
            earthquakes,
            total_count,
            fetched_at: iso_utc(Utc::now()),
            time_range: window,
            min_magnitude: criteria.min_magnitude,
            cached,
        })
    }
}

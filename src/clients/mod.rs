/// External API clients module
use crate::domain::TimeWindow;
use crate::errors::ApiResult;
use crate::services::FeedOrigin;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("quake-feed-service/1.0")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// USGS earthquake summary feed client
pub struct UsgsClient {
    http_client: HttpClient,
    base_url: String,
}

impl UsgsClient {
    pub fn new(base_url: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
        })
    }

    /// Static lookup from time window to the feed resource URL.
    fn feed_url(&self, window: TimeWindow) -> String {
        let resource = match window {
            TimeWindow::Hour => "all_hour.geojson",
            TimeWindow::Day => "all_day.geojson",
            TimeWindow::Week => "all_week.geojson",
            TimeWindow::Month => "all_month.geojson",
        };
        format!("{}/{}", self.base_url.trim_end_matches('/'), resource)
    }
}

#[async_trait]
impl FeedOrigin for UsgsClient {
    /// Fetch the raw GeoJSON feed for a time window. Single attempt, no
    /// retries; the shared client bounds the wait at 30 seconds.
    async fn fetch(&self, window: TimeWindow) -> ApiResult<Value> {
        let url = self.feed_url(window);
        info!(time_range = %window, %url, "Fetching earthquake data from USGS");

        let resp = self
            .http_client
            .get_client()
            .get(&url)
            .send()
            .await?
            .error_for_status()?;

        let json = resp.json().await?;
        Ok(json)
    }
}

/// Domain models for the application
use crate::errors::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lookback window selecting which USGS summary feed to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Hour,
    Day,
    Week,
    Month,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Hour => "hour",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
        }
    }
}

impl FromStr for TimeWindow {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hour" => Ok(TimeWindow::Hour),
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            other => Err(ApiError::Validation(format!(
                "time_range must be one of hour, day, week, month (got \"{}\")",
                other
            ))),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated per-request filter settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCriteria {
    pub min_magnitude: f64,
    pub max_results: usize,
}

fn default_min_magnitude() -> f64 {
    2.5
}

fn default_max_results() -> usize {
    100
}

fn default_time_range() -> String {
    "day".to_string()
}

/// Incoming request body. Every field is optional and falls back to the
/// documented default before validation runs.
#[derive(Debug, Clone, Deserialize)]
pub struct EarthquakeQuery {
    #[serde(default = "default_min_magnitude")]
    pub min_magnitude: f64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_time_range")]
    pub time_range: String,
}

impl Default for EarthquakeQuery {
    fn default() -> Self {
        Self {
            min_magnitude: default_min_magnitude(),
            max_results: default_max_results(),
            time_range: default_time_range(),
        }
    }
}

impl EarthquakeQuery {
    /// Boundary validation: range and enum checks happen here, before any
    /// cache or network work is attempted.
    pub fn validate(&self) -> ApiResult<(TimeWindow, FilterCriteria)> {
        if !(0.0..=10.0).contains(&self.min_magnitude) {
            return Err(ApiError::Validation(format!(
                "min_magnitude must be between 0.0 and 10.0 (got {})",
                self.min_magnitude
            )));
        }
        if !(1..=500).contains(&self.max_results) {
            return Err(ApiError::Validation(format!(
                "max_results must be between 1 and 500 (got {})",
                self.max_results
            )));
        }
        let window = self.time_range.parse::<TimeWindow>()?;
        Ok((
            window,
            FilterCriteria {
                min_magnitude: self.min_magnitude,
                max_results: self.max_results,
            },
        ))
    }
}

/// One transformed earthquake event, derived from a single raw feed feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Earthquake {
    pub id: Option<String>,
    pub magnitude: f64,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub depth: Option<f64>,
    pub time: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Response envelope returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct EarthquakeResponse {
    pub earthquakes: Vec<Earthquake>,
    pub total_count: usize,
    pub fetched_at: String,
    pub time_range: TimeWindow,
    pub min_magnitude: f64,
    pub cached: bool,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}

//! Response payloads of the forecasting API.
//!
//! Every endpoint answers with a `{status, message?, data?}` envelope, also on
//! HTTP error statuses, so payload fields are lenient (`#[serde(default)]`):
//! an error envelope carrying a partial payload must still decode.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::DashboardError;

/// Identifier of a stored forecast model.
///
/// Older models use numeric ids, newer ones document ids, so both JSON
/// numbers and strings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for ModelId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => ModelId(n.to_string()),
            RawId::Text(s) => ModelId(s),
        })
    }
}

/// `{status, message?, data?}` wrapper around every API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Payload of a successful response, or the server's failure message.
    pub fn into_result(self) -> Result<T, DashboardError> {
        if !self.is_success() {
            return Err(DashboardError::Server(
                self.message.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| DashboardError::InvalidResult("response contained no data".to_string()))
    }
}

/// Upper/lower bound series accompanying a forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceIntervals {
    #[serde(default)]
    pub upper: Vec<f64>,
    #[serde(default)]
    pub lower: Vec<f64>,
}

impl ConfidenceIntervals {
    pub fn is_empty(&self) -> bool {
        self.upper.is_empty() && self.lower.is_empty()
    }
}

/// Payload of a successful `generate-forecast` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    #[serde(default)]
    pub model_id: Option<ModelId>,
    /// Dates of the historical points followed by those of the forecast
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub historical: Vec<f64>,
    #[serde(default)]
    pub forecast: Vec<f64>,
    #[serde(default)]
    pub confidence_intervals: Option<ConfidenceIntervals>,
    #[serde(default)]
    pub metrics: Option<Map<String, Value>>,
}

impl ForecastResult {
    /// Confidence bands, if the backend sent non-empty ones.
    pub fn bands(&self) -> Option<&ConfidenceIntervals> {
        self.confidence_intervals.as_ref().filter(|ci| !ci.is_empty())
    }

    /// Check the series lengths line up so the forecast can be plotted on the
    /// trailing slice of `dates`.
    pub fn validate(&self) -> Result<(), String> {
        let expected = self.historical.len() + self.forecast.len();
        if self.dates.len() != expected {
            return Err(format!(
                "expected {} dates for {} historical and {} forecast points, got {}",
                expected,
                self.historical.len(),
                self.forecast.len(),
                self.dates.len()
            ));
        }
        if let Some(bands) = self.bands() {
            if bands.upper.len() != self.forecast.len() || bands.lower.len() != self.forecast.len() {
                return Err(format!(
                    "confidence bands have {}/{} points for a {} point forecast",
                    bands.upper.len(),
                    bands.lower.len(),
                    self.forecast.len()
                ));
            }
        }
        Ok(())
    }

    /// Dates the forecast (and its bands) are plotted against.
    pub fn forecast_dates(&self) -> &[String] {
        let split = self.dates.len().saturating_sub(self.forecast.len());
        &self.dates[split..]
    }

    /// Dates of the historical series.
    pub fn historical_dates(&self) -> &[String] {
        let split = self.dates.len().saturating_sub(self.forecast.len());
        &self.dates[..split]
    }
}

/// Stored model description inside a history response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryModel {
    #[serde(default)]
    pub id: Option<ModelId>,
    #[serde(default)]
    pub name: Option<String>,
    pub method: String,
    pub target_column: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

/// One stored forecast run of a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalResult {
    #[serde(default)]
    pub id: Option<ModelId>,
    #[serde(default)]
    pub forecast_date: Option<String>,
    #[serde(default)]
    pub forecast_data: Vec<f64>,
    #[serde(default)]
    pub forecast_dates: Vec<String>,
    #[serde(default)]
    pub confidence_intervals: Option<ConfidenceIntervals>,
    #[serde(default)]
    pub metrics: Map<String, Value>,
}

/// Payload of `forecast-history/{id}`; results are newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastHistory {
    pub model: HistoryModel,
    #[serde(default)]
    pub results: Vec<HistoricalResult>,
}

impl ForecastHistory {
    pub fn latest(&self) -> Option<&HistoricalResult> {
        self.results.first()
    }
}

/// Item of the `user-forecasts` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub id: ModelId,
    pub name: String,
    pub method: String,
    pub target_column: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ModelSummary {
    /// Creation time as UTC. Naive timestamps are taken to be UTC.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }
}

/// Response of the paginated `user-forecasts` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPage {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<ModelSummary>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_previous: bool,
}

fn first_page() -> u32 {
    1
}

impl ModelPage {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Highest-R² model of the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestModel {
    pub name: String,
    pub method: String,
    #[serde(default)]
    pub r2: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload of `user-statistics/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStatistics {
    #[serde(default)]
    pub total_forecasts: u64,
    /// Forecast count per method
    #[serde(default)]
    pub methods_used: BTreeMap<String, u64>,
    /// Mean forecast period in days, `0` without forecasts
    #[serde(default)]
    pub avg_forecast_period: f64,
    #[serde(default)]
    pub most_recent: Option<ModelSummary>,
    #[serde(default)]
    pub best_model: Option<BestModel>,
}

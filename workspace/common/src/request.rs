use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::csv::CsvRow;

/// Backend model type a forecast is generated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMethod {
    Lstm,
    Arima,
    Prophet,
}

impl ForecastMethod {
    pub const ALL: [ForecastMethod; 3] = [
        ForecastMethod::Lstm,
        ForecastMethod::Arima,
        ForecastMethod::Prophet,
    ];

    /// Select value, also the prefix of the parameter group id.
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMethod::Lstm => "lstm",
            ForecastMethod::Arima => "arima",
            ForecastMethod::Prophet => "prophet",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ForecastMethod::Lstm => "LSTM Neural Network",
            ForecastMethod::Arima => "ARIMA",
            ForecastMethod::Prophet => "Prophet",
        }
    }

    /// DOM id of the container holding this method's parameter inputs.
    pub fn parameter_group_id(&self) -> String {
        format!("{}Params", self.as_str())
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lstm" => Ok(ForecastMethod::Lstm),
            "arima" => Ok(ForecastMethod::Arima),
            "prophet" => Ok(ForecastMethod::Prophet),
            other => Err(format!("Unknown forecasting method: {}", other)),
        }
    }
}

/// Method-specific model parameters, sent as a flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MethodParameters {
    Lstm { sequence_length: u32, epochs: u32 },
    Arima { p: u32, d: u32, q: u32 },
    Prophet { growth: String, seasonality_mode: String },
}

impl MethodParameters {
    pub fn method(&self) -> ForecastMethod {
        match self {
            MethodParameters::Lstm { .. } => ForecastMethod::Lstm,
            MethodParameters::Arima { .. } => ForecastMethod::Arima,
            MethodParameters::Prophet { .. } => ForecastMethod::Prophet,
        }
    }
}

/// Where the historical series comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// A CSV file chosen in the browser
    Upload,
    /// A dataset already held by the backend
    Database,
}

impl DataSource {
    /// Only the literal `"upload"` selects the file upload; anything else
    /// refers to the server-side dataset.
    pub fn from_select_value(value: &str) -> Self {
        if value == "upload" {
            DataSource::Upload
        } else {
            DataSource::Database
        }
    }
}

/// Body of `POST /forecasting/api/generate-forecast/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRequest {
    pub name: String,
    pub date_column: String,
    pub target_column: String,
    pub method: ForecastMethod,
    pub period: u32,
    pub parameters: MethodParameters,
    /// Empty unless the data source is an upload
    pub historical_data: Vec<CsvRow>,
}

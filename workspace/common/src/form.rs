//! State of the "new forecast" form.
//!
//! Every control value is kept as the raw string the browser reports, so the
//! same validation runs for the Yew form and for command line input.

use crate::csv::{self, read_headers};
use crate::error::FormError;
use crate::request::{DataSource, ForecastMethod, ForecastRequest, MethodParameters};

/// Forecast horizon bounds accepted by the backend model.
pub const MIN_PERIOD: u32 = 1;
pub const MAX_PERIOD: u32 = 365;

pub const PROPHET_GROWTH_OPTIONS: [&str; 3] = ["linear", "logistic", "flat"];
pub const PROPHET_SEASONALITY_OPTIONS: [&str; 2] = ["additive", "multiplicative"];

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastForm {
    pub name: String,
    pub method: String,
    pub data_source: String,
    pub date_column: String,
    pub target_column: String,
    pub period: String,
    pub lstm_sequence_length: String,
    pub lstm_epochs: String,
    pub arima_p: String,
    pub arima_d: String,
    pub arima_q: String,
    pub prophet_growth: String,
    pub prophet_seasonality: String,
    /// Name of the selected data file, if any
    pub file_name: Option<String>,
    /// Options of both column selects (value = label)
    pub column_options: Vec<String>,
}

impl Default for ForecastForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            method: ForecastMethod::Lstm.as_str().to_string(),
            data_source: "upload".to_string(),
            date_column: String::new(),
            target_column: String::new(),
            period: "30".to_string(),
            lstm_sequence_length: "10".to_string(),
            lstm_epochs: "50".to_string(),
            arima_p: "1".to_string(),
            arima_d: "1".to_string(),
            arima_q: "1".to_string(),
            prophet_growth: "linear".to_string(),
            prophet_seasonality: "additive".to_string(),
            file_name: None,
            column_options: Vec::new(),
        }
    }
}

impl ForecastForm {
    /// Set a control by its form name. Returns `false` for unknown names.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = match field {
            "name" => &mut self.name,
            "method" => &mut self.method,
            "dataSource" => &mut self.data_source,
            "dateColumn" => &mut self.date_column,
            "targetColumn" => &mut self.target_column,
            "period" => &mut self.period,
            "lstmSequenceLength" => &mut self.lstm_sequence_length,
            "lstmEpochs" => &mut self.lstm_epochs,
            "arimaP" => &mut self.arima_p,
            "arimaD" => &mut self.arima_d,
            "arimaQ" => &mut self.arima_q,
            "prophetGrowth" => &mut self.prophet_growth,
            "prophetSeasonality" => &mut self.prophet_seasonality,
            _ => {
                tracing::warn!(field, "Ignoring unknown form field");
                return false;
            }
        };
        *slot = value;
        true
    }

    pub fn set_method(&mut self, value: impl Into<String>) {
        self.method = value.into();
        tracing::debug!(method = %self.method, "Forecast method changed");
    }

    pub fn set_data_source(&mut self, value: impl Into<String>) {
        self.data_source = value.into();
        tracing::debug!(data_source = %self.data_source, "Data source changed");
    }

    pub fn selected_method(&self) -> Option<ForecastMethod> {
        self.method.parse().ok()
    }

    /// The one parameter group to show; `None` hides all of them.
    pub fn visible_parameter_group(&self) -> Option<ForecastMethod> {
        self.selected_method()
    }

    pub fn is_parameter_group_visible(&self, method: ForecastMethod) -> bool {
        self.visible_parameter_group() == Some(method)
    }

    pub fn data_source(&self) -> DataSource {
        DataSource::from_select_value(&self.data_source)
    }

    pub fn upload_section_visible(&self) -> bool {
        self.data_source() == DataSource::Upload
    }

    /// Repopulate both column selects, selecting the first option of each.
    pub fn apply_headers(&mut self, headers: Vec<String>) {
        self.date_column = headers.first().cloned().unwrap_or_default();
        self.target_column = self.date_column.clone();
        self.column_options = headers;
    }

    /// Record a newly chosen file and populate the column selects from it.
    pub fn load_file(&mut self, file_name: impl Into<String>, text: &str) -> &[String] {
        self.file_name = Some(file_name.into());
        self.apply_headers(read_headers(text));
        &self.column_options
    }

    /// The file input was emptied. The column selects keep their options.
    pub fn clear_file(&mut self) {
        self.file_name = None;
    }

    /// Native-constraint check. Reports the first invalid control.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::new("name", "Please enter a model name."));
        }
        if self.date_column.trim().is_empty() {
            return Err(FormError::new("dateColumn", "Please select the date column."));
        }
        if self.target_column.trim().is_empty() {
            return Err(FormError::new("targetColumn", "Please select the target column."));
        }
        parse_period(&self.period)?;
        self.parameters()?;
        if self.upload_section_visible() && self.file_name.is_none() {
            return Err(FormError::new("dataFile", "Please select a data file."));
        }
        Ok(())
    }

    /// Method-specific parameters with every integer field parsed.
    pub fn parameters(&self) -> Result<MethodParameters, FormError> {
        let method = self
            .selected_method()
            .ok_or_else(|| FormError::new("method", "Please select a forecasting method."))?;

        let parameters = match method {
            ForecastMethod::Lstm => MethodParameters::Lstm {
                sequence_length: parse_integer("lstmSequenceLength", &self.lstm_sequence_length, 1)?,
                epochs: parse_integer("lstmEpochs", &self.lstm_epochs, 1)?,
            },
            ForecastMethod::Arima => MethodParameters::Arima {
                p: parse_integer("arimaP", &self.arima_p, 0)?,
                d: parse_integer("arimaD", &self.arima_d, 0)?,
                q: parse_integer("arimaQ", &self.arima_q, 0)?,
            },
            ForecastMethod::Prophet => MethodParameters::Prophet {
                growth: required_choice("prophetGrowth", &self.prophet_growth)?,
                seasonality_mode: required_choice("prophetSeasonality", &self.prophet_seasonality)?,
            },
        };
        Ok(parameters)
    }

    /// Build the request body. `file_text` is the content of the selected file
    /// and is only read when the data source is an upload.
    pub fn to_request(&self, file_text: Option<&str>) -> Result<ForecastRequest, FormError> {
        self.validate()?;
        let parameters = self.parameters()?;

        let historical_data = match self.data_source() {
            DataSource::Upload => {
                let text = file_text
                    .ok_or_else(|| FormError::new("dataFile", "Please select a data file."))?;
                csv::parse_rows(text)
            }
            DataSource::Database => Vec::new(),
        };

        Ok(ForecastRequest {
            name: self.name.clone(),
            date_column: self.date_column.clone(),
            target_column: self.target_column.clone(),
            method: parameters.method(),
            period: parse_period(&self.period)?,
            parameters,
            historical_data,
        })
    }
}

fn parse_period(raw: &str) -> Result<u32, FormError> {
    let period = parse_integer("period", raw, MIN_PERIOD)?;
    if period > MAX_PERIOD {
        return Err(FormError::new(
            "period",
            format!("Value must be less than or equal to {}.", MAX_PERIOD),
        ));
    }
    Ok(period)
}

fn parse_integer(field: &'static str, raw: &str, min: u32) -> Result<u32, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FormError::new(field, "Please fill out this field."));
    }
    let value: i64 = raw
        .parse()
        .map_err(|_| FormError::new(field, "Please enter a whole number."))?;
    if value < i64::from(min) {
        return Err(FormError::new(
            field,
            format!("Value must be greater than or equal to {}.", min),
        ));
    }
    u32::try_from(value).map_err(|_| FormError::new(field, "Value is too large."))
}

fn required_choice(field: &'static str, raw: &str) -> Result<String, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FormError::new(field, "Please select an option."));
    }
    Ok(raw.to_string())
}

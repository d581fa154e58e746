//! Test helpers: a scripted in-memory backend and form fixtures.

use std::cell::RefCell;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::api::{ForecastApi, endpoints};
use crate::error::ApiError;
use crate::form::ForecastForm;
use crate::request::ForecastRequest;
use crate::response::{
    ApiEnvelope, ForecastHistory, ForecastResult, ModelId, ModelPage, UserStatistics,
};

pub fn at(secs: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, secs).unwrap()
}

/// Valid ARIMA(1,0,1) form over an uploaded `date,value` file.
pub fn arima_upload_form(csv: &str) -> ForecastForm {
    let mut form = ForecastForm {
        name: "Sales".to_string(),
        ..ForecastForm::default()
    };
    form.set_method("arima");
    form.set_data_source("upload");
    form.arima_p = "1".to_string();
    form.arima_d = "0".to_string();
    form.arima_q = "1".to_string();
    form.load_file("sales.csv", csv);
    form.target_column = "value".to_string();
    form
}

/// Answers each endpoint with one canned response and records what it saw.
#[derive(Default)]
pub struct ScriptedApi {
    generate: Option<Result<Value, ApiError>>,
    history: Option<Result<Value, ApiError>>,
    models: Option<Result<Value, ApiError>>,
    delete: Option<Result<Value, ApiError>>,
    statistics: Option<Result<Value, ApiError>>,
    generate_requests: RefCell<Vec<Value>>,
    history_requests: RefCell<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generate(mut self, body: Value) -> Self {
        self.generate = Some(Ok(body));
        self
    }

    pub fn with_generate_error(mut self, error: ApiError) -> Self {
        self.generate = Some(Err(error));
        self
    }

    pub fn with_history(mut self, body: Value) -> Self {
        self.history = Some(Ok(body));
        self
    }

    pub fn with_models(mut self, body: Value) -> Self {
        self.models = Some(Ok(body));
        self
    }

    pub fn with_delete(mut self, body: Value) -> Self {
        self.delete = Some(Ok(body));
        self
    }

    pub fn with_delete_error(mut self, error: ApiError) -> Self {
        self.delete = Some(Err(error));
        self
    }

    pub fn with_statistics(mut self, body: Value) -> Self {
        self.statistics = Some(Ok(body));
        self
    }

    pub fn with_statistics_error(mut self, error: ApiError) -> Self {
        self.statistics = Some(Err(error));
        self
    }

    /// JSON bodies sent to `generate-forecast`.
    pub fn generate_requests(&self) -> Vec<Value> {
        self.generate_requests.borrow().clone()
    }

    /// Paths requested from the history endpoint.
    pub fn history_requests(&self) -> Vec<String> {
        self.history_requests.borrow().clone()
    }

    fn answer<T>(script: &Option<Result<Value, ApiError>>) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        match script {
            Some(Ok(body)) => {
                serde_json::from_value(body.clone()).map_err(|e| ApiError::Decode(e.to_string()))
            }
            Some(Err(error)) => Err(error.clone()),
            None => Err(ApiError::Request("no scripted response".to_string())),
        }
    }
}

#[async_trait(?Send)]
impl ForecastApi for ScriptedApi {
    async fn generate_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<ApiEnvelope<ForecastResult>, ApiError> {
        let body = serde_json::to_value(request).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.generate_requests.borrow_mut().push(body);
        Self::answer(&self.generate)
    }

    async fn forecast_history(
        &self,
        model_id: &ModelId,
    ) -> Result<ApiEnvelope<ForecastHistory>, ApiError> {
        self.history_requests
            .borrow_mut()
            .push(endpoints::forecast_history(model_id));
        Self::answer(&self.history)
    }

    async fn list_models(&self, _page: u32, _limit: u32) -> Result<ModelPage, ApiError> {
        Self::answer(&self.models)
    }

    async fn delete_model(&self, _model_id: &ModelId) -> Result<ApiEnvelope<Value>, ApiError> {
        Self::answer(&self.delete)
    }

    async fn user_statistics(&self) -> Result<ApiEnvelope<UserStatistics>, ApiError> {
        Self::answer(&self.statistics)
    }
}

//! Browser transport for the forecasting API.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use common::{
    ApiEnvelope, ApiError, ForecastApi, ForecastHistory, ForecastRequest, ForecastResult, ModelId,
    ModelPage, UserStatistics, endpoints,
};

use crate::settings;

/// Calls the backend with `fetch`, relative to the configured origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowserForecastApi;

impl BrowserForecastApi {
    pub fn new() -> Self {
        Self
    }
}

fn request_failed(method: &str, endpoint: &str, e: impl std::fmt::Display) -> ApiError {
    let err = ApiError::Request(e.to_string());
    log::error!("{} {} - {}", method, endpoint, err);
    err
}

/// Decode the JSON body. Error statuses usually still carry the
/// `{status, message}` envelope, which is returned as-is.
async fn read_json<T: DeserializeOwned>(
    method: &str,
    endpoint: &str,
    response: Response,
) -> Result<T, ApiError> {
    if !response.ok() {
        log::warn!("{} {} - Non-OK response: {}", method, endpoint, response.status());
        return response.json::<T>().await.map_err(|_| {
            let err = ApiError::Status(response.status());
            log::error!("{} {} - {}", method, endpoint, err);
            err
        });
    }

    log::trace!("{} {} - Response received, parsing JSON", method, endpoint);
    let body = response.json::<T>().await.map_err(|e| {
        let err = ApiError::Decode(e.to_string());
        log::error!("{} {} - {}", method, endpoint, err);
        err
    })?;

    log::info!("{} {} - Success", method, endpoint);
    Ok(body)
}

async fn get<T: DeserializeOwned>(endpoint: &str) -> Result<T, ApiError> {
    let url = settings::get_settings().api_url(endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| request_failed("GET", endpoint, e))?;
    read_json("GET", endpoint, response).await
}

async fn post<T: DeserializeOwned>(endpoint: &str, body: &ForecastRequest) -> Result<T, ApiError> {
    let url = settings::get_settings().api_url(endpoint);
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url)
        .json(body)
        .map_err(|e| request_failed("POST", endpoint, format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| request_failed("POST", endpoint, e))?;
    read_json("POST", endpoint, response).await
}

async fn delete<T: DeserializeOwned>(endpoint: &str) -> Result<T, ApiError> {
    let url = settings::get_settings().api_url(endpoint);
    log::debug!("DELETE request to: {}", url);

    let response = Request::delete(&url)
        .send()
        .await
        .map_err(|e| request_failed("DELETE", endpoint, e))?;
    read_json("DELETE", endpoint, response).await
}

#[async_trait(?Send)]
impl ForecastApi for BrowserForecastApi {
    async fn generate_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<ApiEnvelope<ForecastResult>, ApiError> {
        post(endpoints::GENERATE_FORECAST, request).await
    }

    async fn forecast_history(
        &self,
        model_id: &ModelId,
    ) -> Result<ApiEnvelope<ForecastHistory>, ApiError> {
        get(&endpoints::forecast_history(model_id)).await
    }

    async fn list_models(&self, page: u32, limit: u32) -> Result<ModelPage, ApiError> {
        get(&endpoints::user_forecasts(page, limit)).await
    }

    async fn delete_model(&self, model_id: &ModelId) -> Result<ApiEnvelope<Value>, ApiError> {
        delete(&endpoints::delete_forecast(model_id)).await
    }

    async fn user_statistics(&self) -> Result<ApiEnvelope<UserStatistics>, ApiError> {
        get(&endpoints::user_statistics()).await
    }
}

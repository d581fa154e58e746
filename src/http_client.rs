//! Blocking HTTP transport for the forecasting API.
//!
//! ureq calls run on tokio's blocking pool, so the async controller flows can
//! await them like the browser's `fetch`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, trace, warn};

use common::{
    ApiEnvelope, ApiError, ForecastApi, ForecastHistory, ForecastRequest, ForecastResult, ModelId,
    ModelPage, UserStatistics, endpoints,
};

use crate::config::ClientConfig;

#[derive(Clone)]
pub struct HttpForecastApi {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpForecastApi {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout()).build();
        Self {
            base_url: config.base_url().to_string(),
            agent,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get<T>(&self, endpoint: String) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let url = self.url(&endpoint);
        debug!("GET request to: {}", url);
        let agent = self.agent.clone();
        run_blocking(move || read_json(&endpoint, agent.get(&url).call())).await
    }

    async fn post<T>(&self, endpoint: String, body: Value) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let url = self.url(&endpoint);
        debug!("POST request to: {}", url);
        let agent = self.agent.clone();
        run_blocking(move || read_json(&endpoint, agent.post(&url).send_json(body))).await
    }

    async fn delete<T>(&self, endpoint: String) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let url = self.url(&endpoint);
        debug!("DELETE request to: {}", url);
        let agent = self.agent.clone();
        run_blocking(move || read_json(&endpoint, agent.delete(&url).call())).await
    }
}

async fn run_blocking<T, F>(call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| ApiError::Request(format!("request task failed: {}", e)))?
}

/// Decode the JSON body; error statuses still carry the `{status, message}`
/// envelope, which is returned as-is.
fn read_json<T: DeserializeOwned>(
    endpoint: &str,
    result: Result<ureq::Response, ureq::Error>,
) -> Result<T, ApiError> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            warn!("{} - Non-OK response: {}", endpoint, code);
            return response.into_json::<T>().map_err(|_| {
                error!("{} - HTTP error without JSON body: {}", endpoint, code);
                ApiError::Status(code)
            });
        }
        Err(ureq::Error::Transport(transport)) => {
            let err = ApiError::Request(transport.to_string());
            error!("{} - {}", endpoint, err);
            return Err(err);
        }
    };

    trace!("{} - Response received, parsing JSON", endpoint);
    let body = response.into_json::<T>().map_err(|e| {
        let err = ApiError::Decode(e.to_string());
        error!("{} - {}", endpoint, err);
        err
    })?;
    info!("{} - Response decoded", endpoint);
    Ok(body)
}

#[async_trait(?Send)]
impl ForecastApi for HttpForecastApi {
    async fn generate_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<ApiEnvelope<ForecastResult>, ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Request(format!("Failed to serialize request: {}", e)))?;
        self.post(endpoints::GENERATE_FORECAST.to_string(), body).await
    }

    async fn forecast_history(
        &self,
        model_id: &ModelId,
    ) -> Result<ApiEnvelope<ForecastHistory>, ApiError> {
        self.get(endpoints::forecast_history(model_id)).await
    }

    async fn list_models(&self, page: u32, limit: u32) -> Result<ModelPage, ApiError> {
        self.get(endpoints::user_forecasts(page, limit)).await
    }

    async fn delete_model(&self, model_id: &ModelId) -> Result<ApiEnvelope<Value>, ApiError> {
        self.delete(endpoints::delete_forecast(model_id)).await
    }

    async fn user_statistics(&self) -> Result<ApiEnvelope<UserStatistics>, ApiError> {
        self.get(endpoints::user_statistics()).await
    }
}

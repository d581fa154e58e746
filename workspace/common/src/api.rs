use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;
use crate::request::ForecastRequest;
use crate::response::{
    ApiEnvelope, ForecastHistory, ForecastResult, ModelId, ModelPage, UserStatistics,
};

/// Default page size of the model list.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Endpoint paths, relative to the backend origin.
pub mod endpoints {
    use crate::response::ModelId;

    pub const GENERATE_FORECAST: &str = "/forecasting/api/generate-forecast/";

    pub fn forecast_history(model_id: &ModelId) -> String {
        format!("/forecasting/api/forecast-history/{}/", model_id)
    }

    pub fn user_forecasts(page: u32, limit: u32) -> String {
        format!("/forecasting/api/user-forecasts/?page={}&limit={}", page, limit)
    }

    pub fn delete_forecast(model_id: &ModelId) -> String {
        format!("/forecasting/api/delete-forecast/{}/", model_id)
    }

    pub fn user_statistics() -> String {
        "/forecasting/api/user-statistics/".to_string()
    }
}

/// Transport to the forecasting backend.
///
/// Implementations return the decoded envelope whenever the body is JSON,
/// also for HTTP error statuses, so the server's message reaches the user.
/// They never retry.
#[async_trait(?Send)]
pub trait ForecastApi {
    /// `POST generate-forecast/`
    async fn generate_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<ApiEnvelope<ForecastResult>, ApiError>;

    /// `GET forecast-history/{id}/`
    async fn forecast_history(
        &self,
        model_id: &ModelId,
    ) -> Result<ApiEnvelope<ForecastHistory>, ApiError>;

    /// `GET user-forecasts/?page=&limit=`
    async fn list_models(&self, page: u32, limit: u32) -> Result<ModelPage, ApiError>;

    /// `DELETE delete-forecast/{id}/`
    async fn delete_model(&self, model_id: &ModelId) -> Result<ApiEnvelope<Value>, ApiError>;

    /// `GET user-statistics/`
    async fn user_statistics(&self) -> Result<ApiEnvelope<UserStatistics>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_path_embeds_the_model_id() {
        assert_eq!(
            endpoints::forecast_history(&ModelId::new("42")),
            "/forecasting/api/forecast-history/42/"
        );
        assert_eq!(
            endpoints::user_forecasts(2, 5),
            "/forecasting/api/user-forecasts/?page=2&limit=5"
        );
        assert_eq!(endpoints::user_statistics(), "/forecasting/api/user-statistics/");
    }
}

//! The dashboard controller.
//!
//! [`Dashboard`] owns all UI state of one page lifetime. Each flow is split
//! into a synchronous `begin_*` step, the awaited API call and a synchronous
//! `complete_*` step, so a browser can release its borrow of the controller
//! while the request is in flight. The async helpers (`submit`,
//! `load_history`, ...) chain the steps for callers that can hold `&mut self`
//! across the await.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::api::ForecastApi;
use crate::chart::ChartView;
use crate::error::{ApiError, DashboardError, Result};
use crate::form::ForecastForm;
use crate::notifications::{NotificationKind, NotificationStack};
use crate::request::ForecastRequest;
use crate::response::{
    ApiEnvelope, ForecastHistory, ForecastResult, ModelId, ModelPage, UserStatistics,
};
use crate::view::{ModelDetailsView, ModelList, ModelListEntry, StatisticsView};

const SUBMIT_CONTEXT: &str = "Error generating forecast";
const HISTORY_CONTEXT: &str = "Error loading forecast details";
const LIST_CONTEXT: &str = "Error loading forecasts";
const DELETE_CONTEXT: &str = "Error deleting forecast";
const STATISTICS_CONTEXT: &str = "Error fetching statistics";

/// Lifecycle of a forecast submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

/// Pagination state of the model list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// A successfully generated forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedForecast {
    pub entry: ModelListEntry,
    pub result: ForecastResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    form: ForecastForm,
    phase: SubmissionPhase,
    modal_open: bool,
    chart: Option<ChartView>,
    details: Option<ModelDetailsView>,
    models: ModelList,
    selected: Option<ModelId>,
    history_loading: Option<ModelId>,
    page: Option<PageInfo>,
    statistics: Option<StatisticsView>,
    notifications: NotificationStack,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::with_notifications(NotificationStack::default())
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notification_ttl(ttl: Duration) -> Self {
        Self::with_notifications(NotificationStack::new(ttl))
    }

    fn with_notifications(notifications: NotificationStack) -> Self {
        Self {
            form: ForecastForm::default(),
            phase: SubmissionPhase::Idle,
            modal_open: false,
            chart: None,
            details: None,
            models: ModelList::default(),
            selected: None,
            history_loading: None,
            page: None,
            statistics: None,
            notifications,
        }
    }

    pub fn form(&self) -> &ForecastForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ForecastForm {
        &mut self.form
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Whether the submit control must be disabled.
    pub fn is_submitting(&self) -> bool {
        self.phase != SubmissionPhase::Idle
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn chart(&self) -> Option<&ChartView> {
        self.chart.as_ref()
    }

    pub fn details(&self) -> Option<&ModelDetailsView> {
        self.details.as_ref()
    }

    pub fn models(&self) -> &ModelList {
        &self.models
    }

    pub fn selected_model(&self) -> Option<&ModelId> {
        self.selected.as_ref()
    }

    pub fn loading_model(&self) -> Option<&ModelId> {
        self.history_loading.as_ref()
    }

    pub fn page(&self) -> Option<PageInfo> {
        self.page
    }

    pub fn statistics(&self) -> Option<&StatisticsView> {
        self.statistics.as_ref()
    }

    pub fn notifications(&self) -> &NotificationStack {
        &self.notifications
    }

    pub fn open_modal(&mut self) {
        self.modal_open = true;
    }

    pub fn close_modal(&mut self) {
        if self.is_submitting() {
            debug!("Keeping modal open while a submission is in flight");
            return;
        }
        self.modal_open = false;
    }

    /// A data file was chosen; returns the detected headers.
    pub fn on_file_loaded(&mut self, file_name: &str, text: &str) -> &[String] {
        let headers = self.form.load_file(file_name, text);
        debug!(file_name, headers = headers.len(), "Column selects repopulated");
        headers
    }

    /// The file selection was cleared.
    pub fn on_file_cleared(&mut self) {
        self.form.clear_file();
        debug!("File selection cleared");
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>, now: DateTime<Utc>) -> u64 {
        self.notifications.push(kind, message, now)
    }

    pub fn dismiss_notification(&mut self, id: u64) -> bool {
        self.notifications.dismiss(id)
    }

    pub fn expire_notifications(&mut self, now: DateTime<Utc>) -> usize {
        self.notifications.expire(now)
    }

    fn set_phase(&mut self, next: SubmissionPhase) {
        debug!(from = ?self.phase, to = ?next, "Submission phase change");
        self.phase = next;
    }

    // ----- forecast submission -----

    /// Validate the form and reserve the submission slot.
    ///
    /// Fails with [`DashboardError::Busy`] while another submission is in
    /// flight and with [`DashboardError::Validation`] for an invalid form;
    /// neither produces a notification.
    pub fn begin_submission(&mut self) -> Result<()> {
        if self.phase != SubmissionPhase::Idle {
            warn!(phase = ?self.phase, "Ignoring submission while another one is in flight");
            return Err(DashboardError::Busy);
        }

        self.set_phase(SubmissionPhase::Validating);
        if let Err(err) = self.form.validate() {
            debug!(field = err.field, reason = %err.message, "Form validation failed");
            self.set_phase(SubmissionPhase::Idle);
            return Err(err.into());
        }

        self.set_phase(SubmissionPhase::Submitting);
        Ok(())
    }

    /// Build the request body. Begins the submission first when idle.
    pub fn build_request(&mut self, file_text: Option<&str>) -> Result<ForecastRequest> {
        if self.phase == SubmissionPhase::Idle {
            self.begin_submission()?;
        }
        match self.form.to_request(file_text) {
            Ok(request) => {
                debug!(
                    method = %request.method,
                    rows = request.historical_data.len(),
                    "Forecast request prepared"
                );
                Ok(request)
            }
            Err(err) => {
                self.set_phase(SubmissionPhase::Idle);
                Err(err.into())
            }
        }
    }

    /// Abort the in-flight submission, e.g. when the file could not be read.
    pub fn fail_submission(&mut self, error: DashboardError, now: DateTime<Utc>) -> DashboardError {
        self.set_phase(SubmissionPhase::Failed);
        warn!(%error, "Forecast submission failed");
        self.notifications
            .push(NotificationKind::Error, error.notification_text(SUBMIT_CONTEXT), now);
        self.set_phase(SubmissionPhase::Idle);
        error
    }

    /// Apply the backend's answer to a submission.
    ///
    /// On success the modal closes, the chart is replaced and a list entry is
    /// prepended. On failure only an error notification is added.
    pub fn complete_submission(
        &mut self,
        request: &ForecastRequest,
        outcome: std::result::Result<ApiEnvelope<ForecastResult>, ApiError>,
        now: DateTime<Utc>,
    ) -> Result<GeneratedForecast> {
        let accepted = outcome
            .map_err(DashboardError::from)
            .and_then(ApiEnvelope::into_result)
            .and_then(|result| {
                result.validate().map_err(DashboardError::InvalidResult)?;
                let id = result.model_id.clone().ok_or_else(|| {
                    DashboardError::InvalidResult("response is missing model_id".to_string())
                })?;
                Ok((id, result))
            });

        let (id, result) = match accepted {
            Ok(accepted) => accepted,
            Err(error) => return Err(self.fail_submission(error, now)),
        };

        self.set_phase(SubmissionPhase::Success);
        self.modal_open = false;
        self.chart = Some(ChartView::from_result(&result));
        let entry = ModelListEntry::from_request(id, request, now);
        self.models.prepend(entry.clone());
        self.notifications.push(
            NotificationKind::Success,
            "Forecast generated successfully!",
            now,
        );
        info!(model_id = %entry.id, name = %entry.name, "Forecast generated");
        self.set_phase(SubmissionPhase::Idle);

        Ok(GeneratedForecast { entry, result })
    }

    /// Validate, send and render one forecast request.
    #[instrument(skip(self, api, file_text))]
    pub async fn submit<A>(
        &mut self,
        api: &A,
        file_text: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<GeneratedForecast>
    where
        A: ForecastApi + ?Sized,
    {
        self.begin_submission()?;
        let request = self.build_request(file_text)?;
        let outcome = api.generate_forecast(&request).await;
        self.complete_submission(&request, outcome, now)
    }

    // ----- model history -----

    pub fn begin_history(&mut self, model_id: &ModelId) -> Result<()> {
        if let Some(loading) = &self.history_loading {
            warn!(%loading, requested = %model_id, "History request already in flight");
            return Err(DashboardError::Busy);
        }
        self.history_loading = Some(model_id.clone());
        Ok(())
    }

    /// Show the parameters/metrics of a model and plot its latest run.
    pub fn complete_history(
        &mut self,
        model_id: &ModelId,
        outcome: std::result::Result<ApiEnvelope<ForecastHistory>, ApiError>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.history_loading = None;

        let history = match outcome
            .map_err(DashboardError::from)
            .and_then(ApiEnvelope::into_result)
        {
            Ok(history) => history,
            Err(error) => {
                warn!(%model_id, %error, "Loading forecast history failed");
                self.notifications
                    .push(NotificationKind::Error, error.notification_text(HISTORY_CONTEXT), now);
                return Err(error);
            }
        };

        self.details = Some(ModelDetailsView::from_history(&history));
        if let Some(latest) = history.latest() {
            self.chart = Some(ChartView::from_history_result(latest));
        }
        self.selected = Some(model_id.clone());
        info!(%model_id, runs = history.results.len(), "Forecast history loaded");
        Ok(())
    }

    #[instrument(skip(self, api))]
    pub async fn load_history<A>(
        &mut self,
        api: &A,
        model_id: &ModelId,
        now: DateTime<Utc>,
    ) -> Result<()>
    where
        A: ForecastApi + ?Sized,
    {
        self.begin_history(model_id)?;
        let outcome = api.forecast_history(model_id).await;
        self.complete_history(model_id, outcome, now)
    }

    // ----- model list -----

    /// Replace the model list with one page of stored models.
    pub fn complete_models(
        &mut self,
        outcome: std::result::Result<ModelPage, ApiError>,
        now: DateTime<Utc>,
    ) -> Result<usize> {
        let page = match outcome.map_err(DashboardError::from) {
            Ok(page) if page.is_success() => page,
            Ok(page) => {
                let error = DashboardError::Server(
                    page.message.unwrap_or_else(|| "Unknown error".to_string()),
                );
                return Err(self.list_failed(error, now));
            }
            Err(error) => return Err(self.list_failed(error, now)),
        };

        let entries = page
            .data
            .iter()
            .map(|summary| ModelListEntry::from_summary(summary, now))
            .collect::<Vec<_>>();
        let count = entries.len();
        self.models.replace(entries);
        self.page = Some(PageInfo {
            page: page.page,
            total_pages: page.total_pages,
            total_count: page.total_count,
            has_next: page.has_next,
            has_previous: page.has_previous,
        });
        info!(count, page = page.page, "Model list loaded");
        Ok(count)
    }

    fn list_failed(&mut self, error: DashboardError, now: DateTime<Utc>) -> DashboardError {
        warn!(%error, "Loading model list failed");
        self.notifications
            .push(NotificationKind::Error, error.notification_text(LIST_CONTEXT), now);
        error
    }

    #[instrument(skip(self, api))]
    pub async fn load_models<A>(
        &mut self,
        api: &A,
        page: u32,
        limit: u32,
        now: DateTime<Utc>,
    ) -> Result<usize>
    where
        A: ForecastApi + ?Sized,
    {
        let outcome = api.list_models(page, limit).await;
        self.complete_models(outcome, now)
    }

    // ----- deletion -----

    /// Drop a deleted model from the list; clears the details when it was selected.
    pub fn complete_delete(
        &mut self,
        model_id: &ModelId,
        outcome: std::result::Result<ApiEnvelope<Value>, ApiError>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let envelope = match outcome.map_err(DashboardError::from) {
            Ok(envelope) if envelope.is_success() => envelope,
            Ok(envelope) => {
                let error = DashboardError::Server(
                    envelope.message.unwrap_or_else(|| "Unknown error".to_string()),
                );
                return Err(self.delete_failed(model_id, error, now));
            }
            Err(error) => return Err(self.delete_failed(model_id, error, now)),
        };

        self.models.remove(model_id);
        if self.selected.as_ref() == Some(model_id) {
            self.selected = None;
            self.details = None;
            self.chart = None;
        }
        self.notifications.push(
            NotificationKind::Success,
            envelope
                .message
                .unwrap_or_else(|| "Forecast deleted successfully".to_string()),
            now,
        );
        info!(%model_id, "Forecast deleted");
        Ok(())
    }

    fn delete_failed(
        &mut self,
        model_id: &ModelId,
        error: DashboardError,
        now: DateTime<Utc>,
    ) -> DashboardError {
        warn!(%model_id, %error, "Deleting forecast failed");
        self.notifications
            .push(NotificationKind::Error, error.notification_text(DELETE_CONTEXT), now);
        error
    }

    #[instrument(skip(self, api))]
    pub async fn delete_model<A>(&mut self, api: &A, model_id: &ModelId, now: DateTime<Utc>) -> Result<()>
    where
        A: ForecastApi + ?Sized,
    {
        let outcome = api.delete_model(model_id).await;
        self.complete_delete(model_id, outcome, now)
    }

    // ----- statistics -----

    /// Replace the summary card. A failure keeps the previous card.
    pub fn complete_statistics(
        &mut self,
        outcome: std::result::Result<ApiEnvelope<UserStatistics>, ApiError>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let stats = match outcome
            .map_err(DashboardError::from)
            .and_then(ApiEnvelope::into_result)
        {
            Ok(stats) => stats,
            Err(error) => {
                warn!(%error, "Loading statistics failed");
                self.notifications.push(
                    NotificationKind::Error,
                    error.notification_text(STATISTICS_CONTEXT),
                    now,
                );
                return Err(error);
            }
        };

        self.statistics = Some(StatisticsView::from_statistics(&stats));
        info!(total = stats.total_forecasts, "Statistics loaded");
        Ok(())
    }

    #[instrument(skip(self, api))]
    pub async fn load_statistics<A>(&mut self, api: &A, now: DateTime<Utc>) -> Result<()>
    where
        A: ForecastApi + ?Sized,
    {
        let outcome = api.user_statistics().await;
        self.complete_statistics(outcome, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedApi, arima_upload_form, at};
    use serde_json::json;

    const CSV: &str = "date,value\n2024-01-01,10\n2024-01-02,11";

    fn success_result() -> serde_json::Value {
        json!({
            "status": "success",
            "data": {
                "model_id": 7,
                "dates": ["2024-01-01", "2024-01-02", "2024-01-03"],
                "historical": [10.0, 11.0],
                "forecast": [12.0],
                "confidence_intervals": { "upper": [13.0], "lower": [11.0] },
                "metrics": { "rmse": 0.5 }
            }
        })
    }

    fn ready_dashboard() -> Dashboard {
        let mut dashboard = Dashboard::new();
        *dashboard.form_mut() = arima_upload_form(CSV);
        dashboard.open_modal();
        dashboard
    }

    #[tokio::test]
    async fn successful_submission_renders_and_lists_the_model() {
        let api = ScriptedApi::new().with_generate(success_result());
        let mut dashboard = ready_dashboard();

        let generated = dashboard.submit(&api, Some(CSV), at(0)).await.unwrap();

        let sent = api.generate_requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0]["historical_data"],
            json!([
                { "date": "2024-01-01", "value": "10" },
                { "date": "2024-01-02", "value": "11" }
            ])
        );
        assert_eq!(sent[0]["parameters"], json!({ "p": 1, "d": 0, "q": 1 }));

        assert_eq!(generated.entry.id, ModelId::new("7"));
        assert_eq!(dashboard.models().entries()[0].name, "Sales");
        assert_eq!(dashboard.models().entries()[0].created_at, at(0));
        assert!(!dashboard.is_modal_open());
        assert_eq!(dashboard.chart().unwrap().traces.len(), 4);
        assert_eq!(
            dashboard.notifications().latest().unwrap().kind,
            NotificationKind::Success
        );
        assert_eq!(dashboard.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn server_error_only_notifies() {
        let api = ScriptedApi::new().with_generate(json!({ "status": "error", "message": "bad data" }));
        let mut dashboard = ready_dashboard();

        let err = dashboard.submit(&api, Some(CSV), at(0)).await.unwrap_err();

        assert_eq!(err, DashboardError::Server("bad data".to_string()));
        let latest = dashboard.notifications().latest().unwrap();
        assert_eq!(latest.kind, NotificationKind::Error);
        assert_eq!(latest.message, "bad data");
        assert!(dashboard.chart().is_none());
        assert!(dashboard.models().is_empty());
        assert!(dashboard.is_modal_open());
        assert_eq!(dashboard.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn transport_failure_notifies_with_context() {
        let api = ScriptedApi::new().with_generate_error(ApiError::Request("connection refused".to_string()));
        let mut dashboard = ready_dashboard();

        dashboard.submit(&api, Some(CSV), at(0)).await.unwrap_err();

        assert_eq!(
            dashboard.notifications().latest().unwrap().message,
            "Error generating forecast: Request failed: connection refused"
        );
        assert!(dashboard.models().is_empty());
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_backend() {
        let api = ScriptedApi::new().with_generate(success_result());
        let mut dashboard = ready_dashboard();
        dashboard.form_mut().arima_p = "x".to_string();

        let err = dashboard.submit(&api, Some(CSV), at(0)).await.unwrap_err();

        assert!(matches!(err, DashboardError::Validation(ref e) if e.field == "arimaP"));
        assert!(api.generate_requests().is_empty());
        assert!(dashboard.notifications().is_empty());
        assert_eq!(dashboard.phase(), SubmissionPhase::Idle);
    }

    #[test]
    fn second_submission_is_rejected_while_in_flight() {
        let mut dashboard = ready_dashboard();

        dashboard.begin_submission().unwrap();
        assert!(dashboard.is_submitting());
        assert_eq!(dashboard.begin_submission(), Err(DashboardError::Busy));

        let request = dashboard.build_request(Some(CSV)).unwrap();
        let outcome = Ok(serde_json::from_value(success_result()).unwrap());
        dashboard.complete_submission(&request, outcome, at(1)).unwrap();
        assert!(dashboard.begin_submission().is_ok());
    }

    #[test]
    fn inconsistent_result_is_not_plotted() {
        let mut dashboard = ready_dashboard();
        let request = dashboard.build_request(Some(CSV)).unwrap();
        let outcome = Ok(serde_json::from_value(json!({
            "status": "success",
            "data": { "model_id": 1, "dates": ["d1"], "historical": [1.0], "forecast": [2.0] }
        }))
        .unwrap());

        let err = dashboard.complete_submission(&request, outcome, at(0)).unwrap_err();

        assert!(matches!(err, DashboardError::InvalidResult(_)));
        assert!(dashboard.chart().is_none());
        assert!(dashboard.models().is_empty());
    }

    #[tokio::test]
    async fn cleared_file_blocks_the_next_submission() {
        let api = ScriptedApi::new().with_generate(success_result());
        let mut dashboard = ready_dashboard();
        dashboard.on_file_cleared();

        let error = dashboard.submit(&api, Some(CSV), at(0)).await.unwrap_err();

        assert!(matches!(error, DashboardError::Validation(ref e) if e.field == "dataFile"));
        assert!(api.generate_requests().is_empty());
        assert!(!dashboard.is_submitting());
    }

    #[test]
    fn file_read_failure_releases_the_submission() {
        let mut dashboard = ready_dashboard();
        dashboard.begin_submission().unwrap();

        dashboard.fail_submission(DashboardError::Transport(ApiError::Request("unreadable".into())), at(0));

        assert!(!dashboard.is_submitting());
        assert_eq!(dashboard.notifications().entries().len(), 1);
    }

    #[tokio::test]
    async fn history_renders_details_and_latest_run() {
        let api = ScriptedApi::new().with_history(json!({
            "status": "success",
            "data": {
                "model": {
                    "id": 42,
                    "name": "Sales",
                    "method": "arima",
                    "target_column": "value",
                    "parameters": { "p": 1, "d": 0, "q": 1 }
                },
                "results": [{
                    "id": 3,
                    "forecast_date": "2024-02-01 10:00:00",
                    "forecast_data": [12.0, 13.0],
                    "metrics": { "rmse": 0.123456, "mape": 4.5 }
                }]
            }
        }));
        let mut dashboard = Dashboard::new();
        let id = ModelId::new("42");

        dashboard.load_history(&api, &id, at(0)).await.unwrap();

        assert_eq!(api.history_requests(), vec!["/forecasting/api/forecast-history/42/"]);
        let details = dashboard.details().unwrap();
        assert_eq!(details.metrics[0].value, "0.1235");
        assert_eq!(details.metrics[1].value, "4.5000");
        let chart = dashboard.chart().unwrap();
        assert_eq!(chart.traces[0].y, vec![12.0, 13.0]);
        assert_eq!(dashboard.selected_model(), Some(&id));
        assert!(dashboard.loading_model().is_none());
    }

    #[tokio::test]
    async fn history_without_runs_keeps_the_chart() {
        let api = ScriptedApi::new().with_history(json!({
            "status": "success",
            "data": {
                "model": { "method": "lstm", "target_column": "value", "parameters": {} },
                "results": []
            }
        }));
        let mut dashboard = Dashboard::new();

        dashboard.load_history(&api, &ModelId::new("5"), at(0)).await.unwrap();

        assert!(dashboard.details().unwrap().metrics.is_empty());
        assert!(dashboard.chart().is_none());
    }

    #[tokio::test]
    async fn missing_model_reports_server_message() {
        let api = ScriptedApi::new().with_history(json!({
            "status": "error",
            "message": "Forecast model not found"
        }));
        let mut dashboard = Dashboard::new();

        let err = dashboard
            .load_history(&api, &ModelId::new("9"), at(0))
            .await
            .unwrap_err();

        assert_eq!(err, DashboardError::Server("Forecast model not found".to_string()));
        assert_eq!(
            dashboard.notifications().latest().unwrap().message,
            "Forecast model not found"
        );
        assert!(dashboard.details().is_none());
    }

    #[test]
    fn history_requests_do_not_overlap() {
        let mut dashboard = Dashboard::new();
        dashboard.begin_history(&ModelId::new("1")).unwrap();
        assert_eq!(dashboard.begin_history(&ModelId::new("2")), Err(DashboardError::Busy));
        // submissions are independent of history loads
        *dashboard.form_mut() = arima_upload_form(CSV);
        assert!(dashboard.begin_submission().is_ok());
    }

    #[tokio::test]
    async fn model_list_is_replaced_from_the_listing() {
        let api = ScriptedApi::new().with_models(json!({
            "status": "success",
            "data": [
                { "id": "b", "name": "Newer", "method": "prophet", "target_column": "sales",
                  "created_at": "2024-03-02T08:00:00" },
                { "id": "a", "name": "Older", "method": "lstm", "target_column": "sales",
                  "created_at": "2024-03-01T08:00:00" }
            ],
            "total_count": 7,
            "page": 1,
            "total_pages": 2,
            "has_next": true,
            "has_previous": false
        }));
        let mut dashboard = Dashboard::new();

        let count = dashboard.load_models(&api, 1, 5, at(0)).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(dashboard.models().entries()[0].name, "Newer");
        let page = dashboard.page().unwrap();
        assert_eq!(page.total_count, 7);
        assert!(page.has_next);
    }

    #[tokio::test]
    async fn deleting_the_selected_model_clears_details() {
        let api = ScriptedApi::new()
            .with_generate(success_result())
            .with_history(json!({
                "status": "success",
                "data": {
                    "model": { "method": "arima", "target_column": "value", "parameters": {} },
                    "results": [{ "forecast_data": [1.0], "metrics": {} }]
                }
            }))
            .with_delete(json!({ "status": "success", "message": "Forecast deleted successfully" }));
        let mut dashboard = ready_dashboard();
        let generated = dashboard.submit(&api, Some(CSV), at(0)).await.unwrap();
        let id = generated.entry.id;
        dashboard.load_history(&api, &id, at(1)).await.unwrap();

        dashboard.delete_model(&api, &id, at(2)).await.unwrap();

        assert!(dashboard.models().is_empty());
        assert!(dashboard.details().is_none());
        assert!(dashboard.chart().is_none());
        assert_eq!(
            dashboard.notifications().latest().unwrap().message,
            "Forecast deleted successfully"
        );
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_entry() {
        let api = ScriptedApi::new()
            .with_generate(success_result())
            .with_delete_error(ApiError::Status(500));
        let mut dashboard = ready_dashboard();
        let id = dashboard.submit(&api, Some(CSV), at(0)).await.unwrap().entry.id;

        dashboard.delete_model(&api, &id, at(1)).await.unwrap_err();

        assert_eq!(dashboard.models().len(), 1);
        assert_eq!(
            dashboard.notifications().latest().unwrap().message,
            "Error deleting forecast: HTTP error: 500"
        );
    }

    #[tokio::test]
    async fn statistics_fill_the_summary_card() {
        let api = ScriptedApi::new().with_statistics(json!({
            "status": "success",
            "data": {
                "total_forecasts": 3,
                "methods_used": { "arima": 2, "lstm": 1 },
                "avg_forecast_period": 20.0,
                "most_recent": {
                    "id": "c", "name": "Sales", "method": "arima", "target_column": "value",
                    "created_at": "2024-03-02T08:00:00"
                },
                "best_model": { "name": "Sales", "method": "arima", "r2": 0.8, "created_at": null }
            }
        }));
        let mut dashboard = Dashboard::new();

        dashboard.load_statistics(&api, at(0)).await.unwrap();

        let stats = dashboard.statistics().unwrap();
        assert_eq!(stats.total_forecasts, 3);
        assert_eq!(stats.methods[0].label, "arima");
        assert_eq!(stats.best_model.as_ref().unwrap().1, "0.8000");
        assert!(dashboard.notifications().is_empty());
    }

    #[tokio::test]
    async fn failed_statistics_keep_the_previous_card() {
        let ok = ScriptedApi::new().with_statistics(json!({
            "status": "success",
            "data": { "total_forecasts": 1, "methods_used": { "lstm": 1 }, "avg_forecast_period": 30 }
        }));
        let broken = ScriptedApi::new().with_statistics(json!({
            "status": "error",
            "message": "Error fetching statistics: connection refused"
        }));
        let mut dashboard = Dashboard::new();
        dashboard.load_statistics(&ok, at(0)).await.unwrap();

        let error = dashboard.load_statistics(&broken, at(1)).await.unwrap_err();

        assert!(matches!(error, DashboardError::Server(_)));
        assert_eq!(dashboard.statistics().unwrap().total_forecasts, 1);
        assert_eq!(
            dashboard.notifications().latest().unwrap().message,
            "Error fetching statistics: connection refused"
        );
    }

    #[tokio::test]
    async fn unreachable_statistics_notify_with_context() {
        let api = ScriptedApi::new().with_statistics_error(ApiError::Status(500));
        let mut dashboard = Dashboard::new();

        dashboard.load_statistics(&api, at(0)).await.unwrap_err();

        assert!(dashboard.statistics().is_none());
        assert_eq!(
            dashboard.notifications().latest().unwrap().message,
            "Error fetching statistics: HTTP error: 500"
        );
    }

    #[test]
    fn notifications_expire_through_the_dashboard() {
        let mut dashboard = Dashboard::new();
        dashboard.notify(NotificationKind::Info, "hello", at(0));
        assert_eq!(dashboard.expire_notifications(at(4)), 0);
        assert_eq!(dashboard.expire_notifications(at(5)), 1);
    }
}

//! Browser-independent core of the forecasting dashboard.
//!
//! The Yew frontend and the command line driver share everything here: the
//! request/response payloads of the forecasting API, the new-forecast form
//! with its validation, CSV header detection, the chart/table/list view
//! models and the [`Dashboard`] controller that ties them together.

pub mod api;
pub mod chart;
pub mod csv;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod notifications;
pub mod request;
pub mod response;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{DEFAULT_PAGE_SIZE, ForecastApi, endpoints};
pub use chart::{ChartView, TraceView};
pub use csv::{CsvRow, parse_rows, read_headers};
pub use dashboard::{Dashboard, GeneratedForecast, PageInfo, SubmissionPhase};
pub use error::{ApiError, DashboardError, FormError};
pub use form::{ForecastForm, MAX_PERIOD, MIN_PERIOD};
pub use notifications::{NOTIFICATION_TTL_MS, Notification, NotificationKind, NotificationStack};
pub use request::{DataSource, ForecastMethod, ForecastRequest, MethodParameters};
pub use response::{
    ApiEnvelope, BestModel, ConfidenceIntervals, ForecastHistory, ForecastResult,
    HistoricalResult, HistoryModel, ModelId, ModelPage, ModelSummary, UserStatistics,
};
pub use view::{
    ModelDetailsView, ModelList, ModelListEntry, StatisticsView, TableRow, format_metric,
};

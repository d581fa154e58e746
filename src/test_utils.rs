#[cfg(test)]
pub mod test_utils {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        extract::State,
        http::{Method, StatusCode, Uri, header},
        response::{IntoResponse, Response},
        routing::{delete, get, post},
    };
    use serde_json::Value;
    use tokio::net::TcpListener;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use crate::cli::SubmitArgs;
    use crate::config::ClientConfig;

    /// A canned answer of the mock backend.
    #[derive(Clone, Debug)]
    pub struct Canned {
        pub status: StatusCode,
        pub content_type: &'static str,
        pub body: String,
    }

    impl Canned {
        pub fn json(status: StatusCode, body: Value) -> Self {
            Self {
                status,
                content_type: "application/json",
                body: body.to_string(),
            }
        }

        pub fn text(status: StatusCode, body: &str) -> Self {
            Self {
                status,
                content_type: "text/html",
                body: body.to_string(),
            }
        }
    }

    /// A request as seen by the mock backend.
    #[derive(Clone, Debug, PartialEq)]
    pub struct Recorded {
        pub method: Method,
        pub uri: String,
        pub body: Option<Value>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum Route {
        Generate,
        History,
        List,
        Delete,
        Statistics,
    }

    #[derive(Clone, Default)]
    pub struct MockBackend {
        responses: Arc<HashMap<Route, Canned>>,
        requests: Arc<Mutex<Vec<Recorded>>>,
    }

    impl MockBackend {
        pub fn new(responses: impl IntoIterator<Item = (Route, Canned)>) -> Self {
            Self {
                responses: Arc::new(responses.into_iter().collect()),
                requests: Arc::default(),
            }
        }

        pub fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().unwrap().clone()
        }

        fn answer(&self, route: Route, method: Method, uri: &Uri, body: Option<Value>) -> Response {
            self.requests.lock().unwrap().push(Recorded {
                method,
                uri: uri.to_string(),
                body,
            });
            match self.responses.get(&route) {
                Some(canned) => (
                    canned.status,
                    [(header::CONTENT_TYPE, canned.content_type)],
                    canned.body.clone(),
                )
                    .into_response(),
                None => StatusCode::NOT_FOUND.into_response(),
            }
        }

        /// Serve the forecasting endpoints on an ephemeral local port and
        /// return a client configuration pointing at it.
        pub async fn spawn(self) -> ClientConfig {
            let _ = init_test_tracing();

            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind mock backend");
            let addr = listener.local_addr().expect("Mock backend has no address");
            let app = create_mock_router(self);
            tokio::spawn(async move {
                axum::serve(listener, app).await.expect("Mock backend failed");
            });

            ClientConfig {
                api_url: format!("http://{}/", addr),
                timeout_secs: 5,
                ..ClientConfig::default()
            }
        }
    }

    async fn generate_forecast(
        State(backend): State<MockBackend>,
        uri: Uri,
        Json(body): Json<Value>,
    ) -> Response {
        backend.answer(Route::Generate, Method::POST, &uri, Some(body))
    }

    async fn forecast_history(State(backend): State<MockBackend>, uri: Uri) -> Response {
        backend.answer(Route::History, Method::GET, &uri, None)
    }

    async fn user_forecasts(State(backend): State<MockBackend>, uri: Uri) -> Response {
        backend.answer(Route::List, Method::GET, &uri, None)
    }

    async fn delete_forecast(State(backend): State<MockBackend>, uri: Uri) -> Response {
        backend.answer(Route::Delete, Method::DELETE, &uri, None)
    }

    async fn user_statistics(State(backend): State<MockBackend>, uri: Uri) -> Response {
        backend.answer(Route::Statistics, Method::GET, &uri, None)
    }

    fn create_mock_router(backend: MockBackend) -> Router {
        Router::new()
            .route("/forecasting/api/generate-forecast/", post(generate_forecast))
            .route(
                "/forecasting/api/forecast-history/:model_id/",
                get(forecast_history),
            )
            .route("/forecasting/api/user-forecasts/", get(user_forecasts))
            .route(
                "/forecasting/api/delete-forecast/:model_id/",
                delete(delete_forecast),
            )
            .route("/forecasting/api/user-statistics/", get(user_statistics))
            .with_state(backend)
    }

    /// A configuration pointing at a port nothing listens on.
    pub async fn unreachable_config() -> ClientConfig {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to reserve a port");
        let addr = listener.local_addr().expect("Listener has no address");
        drop(listener);
        ClientConfig {
            api_url: format!("http://{}", addr),
            timeout_secs: 2,
            ..ClientConfig::default()
        }
    }

    /// Arguments of `submit` for an ARIMA(1,0,1) forecast over `file`.
    pub fn arima_submit_args(file: PathBuf) -> SubmitArgs {
        SubmitArgs {
            name: "Sales".to_string(),
            file: Some(file),
            data_source: "upload".to_string(),
            date_column: None,
            target_column: Some("value".to_string()),
            method: "arima".to_string(),
            period: "30".to_string(),
            sequence_length: None,
            epochs: None,
            p: Some("1".to_string()),
            d: Some("0".to_string()),
            q: Some("1".to_string()),
            growth: None,
            seasonality_mode: None,
            chart: None,
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG and defaults to WARN.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}

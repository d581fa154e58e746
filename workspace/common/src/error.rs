use thiserror::Error;

/// A failed native-constraint check on the new forecast form.
///
/// `field` is the form control name (e.g. `arimaP`), so the browser side can
/// focus the offending input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FormError {
    pub field: &'static str,
    pub message: String,
}

impl FormError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Transport-level failures reported by a [`crate::ForecastApi`] implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request could not be sent or no response arrived
    #[error("Request failed: {0}")]
    Request(String),

    /// Non-success HTTP status whose body was not a JSON envelope
    #[error("HTTP error: {0}")]
    Status(u16),

    /// The response body was not valid JSON for the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Error outcomes of the dashboard flows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// Client-side validation failed; nothing was sent
    #[error("Invalid form: {0}")]
    Validation(#[from] FormError),

    /// A request of the same kind is already in flight
    #[error("A request is already in progress")]
    Busy,

    /// The backend answered with `status != "success"`
    #[error("{0}")]
    Server(String),

    /// Network, HTTP or decoding failure
    #[error("{0}")]
    Transport(#[from] ApiError),

    /// The backend answered with success but the payload is unusable
    #[error("Invalid forecast result: {0}")]
    InvalidResult(String),
}

impl DashboardError {
    /// Notification text for a failed flow.
    ///
    /// Server messages are shown verbatim; everything else is prefixed with the
    /// flow's context.
    pub fn notification_text(&self, context: &str) -> String {
        match self {
            DashboardError::Server(message) => message.clone(),
            other => format!("{}: {}", context, other),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

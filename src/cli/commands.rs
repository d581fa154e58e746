pub mod headers;
pub mod history;
pub mod models;
pub mod stats;
pub mod submit;

pub use headers::show_headers;
pub use history::show_history;
pub use models::{delete_model, list_models};
pub use stats::show_statistics;
pub use submit::submit_forecast;

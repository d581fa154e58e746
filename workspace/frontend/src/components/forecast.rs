mod chart;
mod details;
mod form;
mod models;
mod stats;
mod view;

pub use view::ForecastDashboard;

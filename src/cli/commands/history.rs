use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, trace};

use common::{Dashboard, ModelId};

use crate::config::ClientConfig;
use crate::http_client::HttpForecastApi;
use crate::report::{failure, print_table, write_chart};

pub async fn show_history(config: &ClientConfig, model_id: &str, chart: Option<&Path>) -> Result<()> {
    trace!("Entering show_history function");
    let model_id = ModelId::new(model_id);
    let api = HttpForecastApi::new(config);
    let mut dashboard = Dashboard::new();

    info!("Loading forecast history for model {}", model_id);
    if let Err(error) = dashboard.load_history(&api, &model_id, Utc::now()).await {
        return Err(failure(&dashboard, error));
    }

    if let Some(details) = dashboard.details() {
        print_table("Parameters", &details.parameters);
        print_table("Metrics", &details.metrics);
    }

    match (chart, dashboard.chart()) {
        (Some(path), Some(view)) => write_chart(view, path)?,
        (Some(_), None) => println!("Model {} has no forecast runs to plot", model_id),
        _ => {}
    }
    Ok(())
}

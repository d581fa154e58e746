use anyhow::Result;
use chrono::Utc;
use tracing::{info, trace};

use common::{Dashboard, ModelId};

use crate::config::ClientConfig;
use crate::http_client::HttpForecastApi;
use crate::report::{failure, print_entry, print_page};

pub async fn list_models(config: &ClientConfig, page: u32, limit: u32) -> Result<()> {
    trace!("Entering list_models function");
    let api = HttpForecastApi::new(config);
    let mut dashboard = Dashboard::new();

    info!("Listing forecasts, page {} (limit {})", page, limit);
    if let Err(error) = dashboard.load_models(&api, page, limit, Utc::now()).await {
        return Err(failure(&dashboard, error));
    }

    if dashboard.models().is_empty() {
        println!("No forecasts yet");
    }
    for entry in dashboard.models().entries() {
        print_entry(entry);
    }
    if let Some(page) = dashboard.page() {
        print_page(&page);
    }
    Ok(())
}

pub async fn delete_model(config: &ClientConfig, model_id: &str) -> Result<()> {
    trace!("Entering delete_model function");
    let model_id = ModelId::new(model_id);
    let api = HttpForecastApi::new(config);
    let mut dashboard = Dashboard::new();

    info!("Deleting forecast model {}", model_id);
    if let Err(error) = dashboard.delete_model(&api, &model_id, Utc::now()).await {
        return Err(failure(&dashboard, error));
    }
    if let Some(notification) = dashboard.notifications().latest() {
        println!("{}", notification.message);
    }
    Ok(())
}

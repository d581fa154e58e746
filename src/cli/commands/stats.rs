use anyhow::Result;
use chrono::Utc;
use tracing::{info, trace};

use common::Dashboard;

use crate::config::ClientConfig;
use crate::http_client::HttpForecastApi;
use crate::report::{failure, print_table};

pub async fn show_statistics(config: &ClientConfig) -> Result<()> {
    trace!("Entering show_statistics function");
    let api = HttpForecastApi::new(config);
    let mut dashboard = Dashboard::new();

    info!("Loading forecast statistics");
    if let Err(error) = dashboard.load_statistics(&api, Utc::now()).await {
        return Err(failure(&dashboard, error));
    }

    if let Some(stats) = dashboard.statistics() {
        print_table("Statistics", &stats.summary_rows());
        print_table("Methods used", &stats.methods);
    }
    Ok(())
}

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use common::DEFAULT_PAGE_SIZE;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONFIG_FILE: &str = "forecast-dashboard";

/// Settings of the command line client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://localhost:8000`
    pub api_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Default page size of `list`
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL without a trailing slash, so endpoint paths can be appended.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

/// Load configuration from (lowest to highest priority) built-in defaults,
/// `forecast-dashboard.toml` (or `path`), and `FORECAST_*` environment
/// variables. A `.env` file is honoured.
pub fn load_config(path: Option<&Path>) -> Result<ClientConfig> {
    dotenvy::dotenv().ok();

    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let settings = config::Config::builder()
        .set_default("api_url", DEFAULT_API_URL)?
        .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
        .set_default("page_size", i64::from(DEFAULT_PAGE_SIZE))?
        .add_source(file)
        .add_source(config::Environment::with_prefix("FORECAST").try_parsing(true))
        .build()
        .context("Failed to read configuration")?;

    let config: ClientConfig = settings
        .try_deserialize()
        .context("Invalid configuration")?;
    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "api_url = \"http://forecast.internal:9000/\"").unwrap();
        writeln!(file, "timeout_secs = 5").unwrap();

        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.base_url(), "http://forecast.internal:9000");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/forecast.toml"))).is_err());
    }
}

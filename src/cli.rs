use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

pub mod commands;

use crate::config::{ClientConfig, load_config};
use commands::{
    delete_model, list_models, show_headers, show_history, show_statistics, submit_forecast,
};

#[derive(Parser)]
#[command(name = "forecast-dashboard")]
#[command(about = "Forecasting dashboard client: generate forecasts and browse stored models")]
#[command(version)]
pub struct Cli {
    /// Backend origin, e.g. http://localhost:8000 (overrides configuration)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides configuration)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Configuration file (defaults to ./forecast-dashboard.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the column headers detected in a CSV file
    Headers {
        /// Path to the CSV file
        file: PathBuf,
    },
    /// Generate a forecast
    ///
    /// Examples:
    ///   submit --name Sales --file sales.csv --target-column value --method arima --p 1 --d 0 --q 1
    ///   submit --name Sales --data-source database --date-column date --target-column value
    Submit(SubmitArgs),
    /// Show parameters, metrics and latest forecast of a stored model
    History {
        /// Model id as shown by `list`
        model_id: String,

        /// Write the chart of the latest run to this HTML file
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// List stored models, newest first
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Page size (defaults to the configured page size)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Delete a stored model
    Delete {
        /// Model id as shown by `list`
        model_id: String,
    },
    /// Summarize stored forecasts: totals, methods used and best model
    Stats,
}

/// Values of the new forecast form. Numbers are passed through as typed and
/// validated exactly like the browser form.
#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    /// Model name
    #[arg(long)]
    pub name: String,

    /// CSV file with the historical series (required for the upload source)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// "upload" or any other value for the server-side dataset
    #[arg(long, default_value = "upload")]
    pub data_source: String,

    /// Date column (defaults to the first CSV header)
    #[arg(long)]
    pub date_column: Option<String>,

    /// Target column (defaults to the first CSV header)
    #[arg(long)]
    pub target_column: Option<String>,

    /// lstm, arima or prophet
    #[arg(short, long, default_value = "lstm")]
    pub method: String,

    /// Forecast horizon in steps (1-365)
    #[arg(long, default_value = "30")]
    pub period: String,

    /// LSTM sequence length
    #[arg(long)]
    pub sequence_length: Option<String>,

    /// LSTM training epochs
    #[arg(long)]
    pub epochs: Option<String>,

    /// ARIMA autoregressive order
    #[arg(long)]
    pub p: Option<String>,

    /// ARIMA differencing order
    #[arg(long)]
    pub d: Option<String>,

    /// ARIMA moving-average order
    #[arg(long)]
    pub q: Option<String>,

    /// Prophet growth: linear, logistic or flat
    #[arg(long)]
    pub growth: Option<String>,

    /// Prophet seasonality mode: additive or multiplicative
    #[arg(long)]
    pub seasonality_mode: Option<String>,

    /// Write the resulting chart to this HTML file
    #[arg(long)]
    pub chart: Option<PathBuf>,
}

impl Cli {
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        Ok(config)
    }

    pub async fn run(self) -> Result<()> {
        let config = self.client_config()?;
        match self.command {
            Commands::Headers { file } => show_headers(&file),
            Commands::Submit(args) => submit_forecast(&config, args).await,
            Commands::History { model_id, chart } => {
                show_history(&config, &model_id, chart.as_deref()).await
            }
            Commands::List { page, limit } => {
                list_models(&config, page, limit.unwrap_or(config.page_size)).await
            }
            Commands::Delete { model_id } => delete_model(&config, &model_id).await,
            Commands::Stats => show_statistics(&config).await,
        }
    }
}

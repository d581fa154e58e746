use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info, trace};

use common::{Dashboard, DataSource, ForecastForm};

use crate::cli::SubmitArgs;
use crate::config::ClientConfig;
use crate::http_client::HttpForecastApi;
use crate::report::{failure, print_result, write_chart};

/// Fill the form the way a user would: method and source first, then the
/// file (which preselects the columns), then explicit column choices.
fn fill_form(dashboard: &mut Dashboard, args: &SubmitArgs) -> Result<Option<String>> {
    let form = dashboard.form_mut();
    form.set_method(args.method.as_str());
    form.set_data_source(args.data_source.as_str());
    form.set_field("name", args.name.as_str());
    form.set_field("period", args.period.as_str());
    set_optional(form, "lstmSequenceLength", &args.sequence_length);
    set_optional(form, "lstmEpochs", &args.epochs);
    set_optional(form, "arimaP", &args.p);
    set_optional(form, "arimaD", &args.d);
    set_optional(form, "arimaQ", &args.q);
    set_optional(form, "prophetGrowth", &args.growth);
    set_optional(form, "prophetSeasonality", &args.seasonality_mode);

    let file_text = match (&args.file, form.data_source()) {
        (Some(path), DataSource::Upload) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let headers = dashboard.on_file_loaded(&file_name, &text);
            debug!("Columns available for selection: {:?}", headers);
            Some(text)
        }
        (Some(path), DataSource::Database) => {
            debug!("Ignoring {} for the database data source", path.display());
            None
        }
        (None, _) => None,
    };

    let form = dashboard.form_mut();
    set_optional(form, "dateColumn", &args.date_column);
    set_optional(form, "targetColumn", &args.target_column);
    Ok(file_text)
}

fn set_optional(form: &mut ForecastForm, field: &str, value: &Option<String>) {
    if let Some(value) = value {
        form.set_field(field, value.as_str());
    }
}

pub async fn submit_forecast(config: &ClientConfig, args: SubmitArgs) -> Result<()> {
    trace!("Entering submit_forecast function");
    let mut dashboard = Dashboard::new();
    let file_text = fill_form(&mut dashboard, &args)?;
    dashboard.open_modal();

    let api = HttpForecastApi::new(config);
    info!("Submitting forecast '{}' to {}", args.name, config.base_url());
    let generated = match dashboard.submit(&api, file_text.as_deref(), Utc::now()).await {
        Ok(generated) => generated,
        Err(error) => return Err(failure(&dashboard, error)),
    };

    if let Some(notification) = dashboard.notifications().latest() {
        println!("{}", notification.message);
    }
    println!(
        "Model {} ({}, target {})",
        generated.entry.id,
        generated.entry.method.to_uppercase(),
        generated.entry.target_column
    );
    print_result(&generated.result);

    if let (Some(path), Some(chart)) = (&args.chart, dashboard.chart()) {
        write_chart(chart, path)?;
    }
    Ok(())
}

//! Plain-text rendering of dashboard state for the terminal.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::info;

use common::{
    ChartView, Dashboard, DashboardError, ForecastResult, ModelListEntry, PageInfo, TableRow,
};

/// Turn a failed flow into the message the dashboard would have shown.
pub fn failure(dashboard: &Dashboard, error: DashboardError) -> anyhow::Error {
    match error {
        DashboardError::Validation(err) => anyhow!("Invalid {}: {}", err.field, err.message),
        DashboardError::Busy => anyhow!("{}", DashboardError::Busy),
        other => match dashboard.notifications().latest() {
            Some(notification) => anyhow!("{}", notification.message),
            None => anyhow!("{}", other),
        },
    }
}

pub fn print_table(title: &str, rows: &[TableRow]) {
    println!("{}", title);
    if rows.is_empty() {
        println!("  (none)");
        return;
    }
    let width = rows.iter().map(|row| row.label.len()).max().unwrap_or(0);
    for row in rows {
        println!("  {:<width$}  {}", row.label, row.value, width = width);
    }
}

pub fn print_entry(entry: &ModelListEntry) {
    println!(
        "{:>6}  {:<24}  {:<8}  {:<16}  {}",
        entry.id,
        entry.name,
        entry.method.to_uppercase(),
        entry.target_column,
        entry.created_label()
    );
}

pub fn print_page(page: &PageInfo) {
    println!(
        "Page {} of {} ({} forecasts){}{}",
        page.page,
        page.total_pages.max(1),
        page.total_count,
        if page.has_previous { ", previous available" } else { "" },
        if page.has_next { ", next available" } else { "" },
    );
}

pub fn print_result(result: &ForecastResult) {
    println!(
        "{} historical points, {} forecast points",
        result.historical.len(),
        result.forecast.len()
    );
    for (date, value) in result.forecast_dates().iter().zip(&result.forecast) {
        println!("  {}  {:.4}", date, value);
    }
}

/// Write the chart as a standalone HTML page.
pub fn write_chart(chart: &ChartView, path: &Path) -> Result<()> {
    let html = chart.to_plot().to_html();
    std::fs::write(path, html)
        .with_context(|| format!("Failed to write chart to {}", path.display()))?;
    info!("Chart written to {}", path.display());
    Ok(())
}

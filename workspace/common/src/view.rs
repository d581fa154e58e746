//! View models for the details tables and the model list.

use chrono::{DateTime, Local, Utc};
use serde_json::Value;

use crate::request::ForecastRequest;
use crate::response::{ForecastHistory, ModelId, ModelSummary, UserStatistics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub label: String,
    pub value: String,
}

impl TableRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Numbers are shown with 4 decimals, other values as text.
pub fn format_metric(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) => fixed_4(f),
            None => n.to_string(),
        },
        other => format_parameter(other),
    }
}

/// Four decimals, exact halves rounded away from zero.
///
/// `{:.4}` alone rounds exact halves to even. A value sits exactly halfway between
/// two 4-decimal numbers only when it is an odd multiple of 1/32, and then
/// scaling by 10^4 is exact.
fn fixed_4(f: f64) -> String {
    let scaled = f * 32.0;
    if scaled.fract() == 0.0 && scaled % 2.0 != 0.0 {
        let rounded = (f.abs() * 1e4).round() / 1e4;
        format!("{:.4}", rounded.copysign(f))
    } else {
        format!("{:.4}", f)
    }
}

pub fn format_parameter(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parameters and metrics tables of a selected model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelDetailsView {
    pub parameters: Vec<TableRow>,
    /// Metrics of the most recent run; empty when the model never ran
    pub metrics: Vec<TableRow>,
}

impl ModelDetailsView {
    pub fn from_history(history: &ForecastHistory) -> Self {
        let model = &history.model;
        let mut parameters = vec![
            TableRow::new("Method", model.method.clone()),
            TableRow::new("Target", model.target_column.clone()),
        ];
        parameters.extend(
            model
                .parameters
                .iter()
                .map(|(key, value)| TableRow::new(key.clone(), format_parameter(value))),
        );

        let metrics = history
            .latest()
            .map(|result| {
                result
                    .metrics
                    .iter()
                    .map(|(key, value)| TableRow::new(key.clone(), format_metric(value)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            parameters,
            metrics,
        }
    }
}

/// Compact summary of a generated model shown in the selectable list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelListEntry {
    pub id: ModelId,
    pub name: String,
    pub method: String,
    pub target_column: String,
    pub created_at: DateTime<Utc>,
}

impl ModelListEntry {
    pub fn from_request(id: ModelId, request: &ForecastRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: request.name.clone(),
            method: request.method.as_str().to_string(),
            target_column: request.target_column.clone(),
            created_at,
        }
    }

    /// `fallback` is used when the listing carries no parseable timestamp.
    pub fn from_summary(summary: &ModelSummary, fallback: DateTime<Utc>) -> Self {
        let created_at = summary.created_at_utc().unwrap_or_else(|| {
            tracing::warn!(id = %summary.id, raw = ?summary.created_at, "Unparseable model timestamp");
            fallback
        });
        Self {
            id: summary.id.clone(),
            name: summary.name.clone(),
            method: summary.method.clone(),
            target_column: summary.target_column.clone(),
            created_at,
        }
    }

    /// "Created: ..." text in local time.
    pub fn created_label(&self) -> String {
        format!(
            "Created: {}",
            self.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// Summary card of the user's stored forecasts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatisticsView {
    pub total_forecasts: u64,
    /// One decimal, e.g. `30.5`
    pub average_period: String,
    /// `name (method)` of the newest forecast
    pub most_recent: Option<String>,
    /// `name (method)` and its R² with 4 decimals
    pub best_model: Option<(String, String)>,
    /// Method and count, most used first
    pub methods: Vec<TableRow>,
}

impl StatisticsView {
    pub fn from_statistics(stats: &UserStatistics) -> Self {
        let mut methods: Vec<(&String, u64)> =
            stats.methods_used.iter().map(|(m, n)| (m, *n)).collect();
        methods.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        Self {
            total_forecasts: stats.total_forecasts,
            average_period: format!("{:.1}", stats.avg_forecast_period),
            most_recent: stats
                .most_recent
                .as_ref()
                .map(|m| format!("{} ({})", m.name, m.method)),
            best_model: stats.best_model.as_ref().map(|m| {
                (
                    format!("{} ({})", m.name, m.method),
                    format_metric(&Value::from(m.r2)),
                )
            }),
            methods: methods
                .into_iter()
                .map(|(method, count)| TableRow::new(method.clone(), count.to_string()))
                .collect(),
        }
    }

    /// Label/value rows for plain-text output.
    pub fn summary_rows(&self) -> Vec<TableRow> {
        let mut rows = vec![
            TableRow::new("Total forecasts", self.total_forecasts.to_string()),
            TableRow::new("Average period", format!("{} days", self.average_period)),
        ];
        if let Some(recent) = &self.most_recent {
            rows.push(TableRow::new("Most recent", recent.clone()));
        }
        if let Some((model, r2)) = &self.best_model {
            rows.push(TableRow::new("Best model", format!("{}, R² {}", model, r2)));
        }
        rows
    }
}

/// Newest-first list of models for the current page lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelList {
    entries: Vec<ModelListEntry>,
}

impl ModelList {
    pub fn prepend(&mut self, entry: ModelListEntry) {
        self.entries.insert(0, entry);
    }

    pub fn replace(&mut self, entries: Vec<ModelListEntry>) {
        self.entries = entries;
    }

    pub fn remove(&mut self, id: &ModelId) -> Option<ModelListEntry> {
        let index = self.entries.iter().position(|entry| &entry.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, id: &ModelId) -> Option<&ModelListEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn entries(&self) -> &[ModelListEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

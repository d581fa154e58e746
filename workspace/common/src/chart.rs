use plotly::common::{DashType, Fill, Line, Mode, Orientation, Title};
use plotly::layout::{Axis, HoverMode, Legend};
use plotly::{Layout, Plot, Scatter};

use crate::response::{ConfidenceIntervals, ForecastResult, HistoricalResult};

pub const HISTORICAL_COLOR: &str = "#2196F3";
pub const FORECAST_COLOR: &str = "#4CAF50";
pub const BOUND_COLOR: &str = "#90CAF9";

/// One line series of the forecast chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceView {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub color: &'static str,
    pub dotted: bool,
    /// Shade the area between this series and the previous one
    pub fill_to_previous: bool,
    pub show_legend: bool,
}

impl TraceView {
    fn line(name: &str, x: Vec<String>, y: Vec<f64>, color: &'static str) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
            color,
            dotted: false,
            fill_to_previous: false,
            show_legend: true,
        }
    }

    fn bound(name: &str, x: Vec<String>, y: Vec<f64>, fill_to_previous: bool) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
            color: BOUND_COLOR,
            dotted: true,
            fill_to_previous,
            show_legend: false,
        }
    }
}

/// Renderer-independent description of the forecast chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub traces: Vec<TraceView>,
}

impl ChartView {
    fn with_traces(traces: Vec<TraceView>) -> Self {
        Self {
            title: "Forecast Results".to_string(),
            x_title: "Date".to_string(),
            y_title: "Value".to_string(),
            traces,
        }
    }

    /// Historical, Forecast and optional bound series of a fresh forecast.
    ///
    /// The result must have passed [`ForecastResult::validate`].
    pub fn from_result(result: &ForecastResult) -> Self {
        let forecast_dates = result.forecast_dates().to_vec();
        let mut traces = vec![
            TraceView::line(
                "Historical",
                result.historical_dates().to_vec(),
                result.historical.clone(),
                HISTORICAL_COLOR,
            ),
            TraceView::line(
                "Forecast",
                forecast_dates.clone(),
                result.forecast.clone(),
                FORECAST_COLOR,
            ),
        ];
        if let Some(bands) = result.bands() {
            push_bounds(&mut traces, forecast_dates, bands);
        }
        Self::with_traces(traces)
    }

    /// Forecast series of a stored run. Stored runs keep no historical
    /// series; without stored dates the x axis counts forecast steps.
    pub fn from_history_result(result: &HistoricalResult) -> Self {
        let dates: Vec<String> = if result.forecast_dates.len() == result.forecast_data.len() {
            result.forecast_dates.clone()
        } else {
            (1..=result.forecast_data.len()).map(|step| step.to_string()).collect()
        };

        let mut traces = vec![TraceView::line(
            "Forecast",
            dates.clone(),
            result.forecast_data.clone(),
            FORECAST_COLOR,
        )];
        if let Some(bands) = result.confidence_intervals.as_ref() {
            if !bands.is_empty()
                && bands.upper.len() == dates.len()
                && bands.lower.len() == dates.len()
            {
                push_bounds(&mut traces, dates, bands);
            }
        }
        Self::with_traces(traces)
    }

    pub fn trace(&self, name: &str) -> Option<&TraceView> {
        self.traces.iter().find(|trace| trace.name == name)
    }

    /// Build the plotly figure: unified hover, horizontal legend below the plot.
    pub fn to_plot(&self) -> Plot {
        let mut plot = Plot::new();
        for trace in &self.traces {
            let mut line = Line::new().color(trace.color);
            if trace.dotted {
                line = line.dash(DashType::Dot);
            }
            let mut scatter = Scatter::new(trace.x.clone(), trace.y.clone())
                .name(&trace.name)
                .mode(Mode::Lines)
                .line(line)
                .show_legend(trace.show_legend);
            if trace.fill_to_previous {
                scatter = scatter.fill(Fill::ToNextY);
            }
            plot.add_trace(scatter);
        }

        let layout = Layout::new()
            .title(Title::with_text(&self.title))
            .x_axis(Axis::new().title(Title::with_text(&self.x_title)))
            .y_axis(Axis::new().title(Title::with_text(&self.y_title)))
            .hover_mode(HoverMode::XUnified)
            .show_legend(true)
            .legend(Legend::new().orientation(Orientation::Horizontal).y(-0.2));
        plot.set_layout(layout);
        plot
    }
}

fn push_bounds(traces: &mut Vec<TraceView>, dates: Vec<String>, bands: &ConfidenceIntervals) {
    traces.push(TraceView::bound(
        "Upper Bound",
        dates.clone(),
        bands.upper.clone(),
        false,
    ));
    traces.push(TraceView::bound("Lower Bound", dates, bands.lower.clone(), true));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<String> {
        (1..=n).map(|d| format!("2024-01-{:02}", d)).collect()
    }

    #[test]
    fn fresh_result_plots_history_then_forecast() {
        let result = ForecastResult {
            dates: dates(5),
            historical: vec![1.0, 2.0, 3.0],
            forecast: vec![4.0, 5.0],
            ..ForecastResult::default()
        };
        let chart = ChartView::from_result(&result);

        assert_eq!(chart.traces.len(), 2);
        let historical = chart.trace("Historical").unwrap();
        let forecast = chart.trace("Forecast").unwrap();
        assert_eq!(historical.x, dates(3));
        assert_eq!(forecast.x, dates(5)[3..].to_vec());
        assert_eq!(forecast.color, FORECAST_COLOR);
    }

    #[test]
    fn bands_share_the_forecast_dates_and_fill_between() {
        let result = ForecastResult {
            dates: dates(4),
            historical: vec![1.0, 2.0],
            forecast: vec![3.0, 4.0],
            confidence_intervals: Some(ConfidenceIntervals {
                upper: vec![3.5, 4.5],
                lower: vec![2.5, 3.5],
            }),
            ..ForecastResult::default()
        };
        let chart = ChartView::from_result(&result);

        assert_eq!(chart.traces.len(), 4);
        let upper = chart.trace("Upper Bound").unwrap();
        let lower = chart.trace("Lower Bound").unwrap();
        assert_eq!(upper.x, chart.trace("Forecast").unwrap().x);
        assert_eq!(lower.x, upper.x);
        assert!(!upper.fill_to_previous && lower.fill_to_previous);
        assert!(!upper.show_legend && !lower.show_legend);
        assert_eq!(chart.traces[3].name, "Lower Bound");
    }

    #[test]
    fn history_without_dates_uses_step_numbers() {
        let result = HistoricalResult {
            forecast_data: vec![10.0, 11.0, 12.0],
            ..HistoricalResult::default()
        };
        let chart = ChartView::from_history_result(&result);

        assert_eq!(chart.traces.len(), 1);
        assert_eq!(chart.traces[0].x, vec!["1", "2", "3"]);
    }

    #[test]
    fn plot_layout_uses_unified_hover_and_bottom_legend() {
        let result = ForecastResult {
            dates: dates(2),
            historical: vec![1.0],
            forecast: vec![2.0],
            ..ForecastResult::default()
        };
        let json = ChartView::from_result(&result).to_plot().to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["layout"]["hovermode"], "x unified");
        assert_eq!(value["layout"]["legend"]["orientation"], "h");
        assert_eq!(value["data"].as_array().unwrap().len(), 2);
    }
}

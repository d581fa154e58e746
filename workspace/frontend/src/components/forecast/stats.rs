use common::StatisticsView;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub stats: Option<StatisticsView>,
}

#[function_component(ForecastStats)]
pub fn forecast_stats(props: &Props) -> Html {
    let Some(stats) = &props.stats else {
        return html! {};
    };

    let methods = stats
        .methods
        .iter()
        .map(|row| format!("{} {}", row.label, row.value))
        .collect::<Vec<_>>()
        .join(" · ");

    html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4 mb-6">
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">{"Total Forecasts"}</div>
                    <div class="stat-value text-primary">{stats.total_forecasts}</div>
                    <div class="stat-desc">{methods}</div>
                </div>
            </div>
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">{"Average Period"}</div>
                    <div class="stat-value">{format!("{} days", stats.average_period)}</div>
                    <div class="stat-desc">
                        {stats.most_recent.as_ref().map(|m| format!("Latest: {}", m)).unwrap_or_default()}
                    </div>
                </div>
            </div>
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">{"Best Model (R²)"}</div>
                    {match &stats.best_model {
                        Some((name, r2)) => html! {
                            <>
                                <div class="stat-value text-success">{r2}</div>
                                <div class="stat-desc">{name}</div>
                            </>
                        },
                        None => html! { <div class="stat-value text-gray-400">{"-"}</div> },
                    }}
                </div>
            </div>
        </div>
    }
}

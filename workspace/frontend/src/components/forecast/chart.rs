use common::ChartView;
use wasm_bindgen::prelude::*;
use yew::prelude::*;

const CHART_ID: &str = "forecastChart";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);

    #[wasm_bindgen(js_namespace = Plotly)]
    fn purge(div_id: &str);
}

/// Hand the figure to plotly.js, replacing whatever the container showed.
fn render(chart: &ChartView) -> Result<(), JsValue> {
    let figure = js_sys::JSON::parse(&chart.to_plot().to_json())?;
    let data = js_sys::Reflect::get(&figure, &JsValue::from_str("data"))?;
    let layout = js_sys::Reflect::get(&figure, &JsValue::from_str("layout"))?;
    newPlot(CHART_ID, data, layout);
    Ok(())
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub chart: Option<ChartView>,
}

#[function_component(ForecastChart)]
pub fn forecast_chart(props: &Props) -> Html {
    use_effect_with(props.chart.clone(), |chart| {
        match chart {
            Some(chart) => {
                log::debug!("Plotting {} traces", chart.traces.len());
                if let Err(e) = render(chart) {
                    log::error!("Failed to render forecast chart: {:?}", e);
                }
            }
            None => purge(CHART_ID),
        }
        || ()
    });

    let style = if props.chart.is_some() {
        "width:100%; height:400px;"
    } else {
        "display:none;"
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                {if props.chart.is_none() {
                    html! {
                        <div class="text-center py-8 text-gray-500">
                            <i class="fas fa-chart-area text-4xl mb-4 opacity-50"></i>
                            <p>{"Generate a forecast or pick a model to see its chart."}</p>
                        </div>
                    }
                } else {
                    html! {}
                }}
                <div id={CHART_ID} style={style}></div>
            </div>
        </div>
    }
}

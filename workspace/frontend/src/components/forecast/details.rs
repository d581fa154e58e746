use common::{ModelDetailsView, TableRow};
use yew::prelude::*;

use crate::common::loading::Loading;

fn table(id: &'static str, rows: &[TableRow], empty: &'static str) -> Html {
    html! {
        <div id={id}>
            {if rows.is_empty() {
                html! { <p class="text-sm text-gray-500">{empty}</p> }
            } else {
                html! {
                    <table class="table table-sm">
                        <tbody>
                            {for rows.iter().map(|row| html! {
                                <tr>
                                    <th>{&row.label}</th>
                                    <td>{&row.value}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                }
            }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub details: Option<ModelDetailsView>,
    pub loading: bool,
}

#[function_component(ModelDetails)]
pub fn model_details(props: &Props) -> Html {
    let body = if props.loading {
        html! { <Loading text={Some("Loading forecast details...".to_string())} /> }
    } else {
        match &props.details {
            Some(details) => html! {
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <div>
                        <h4 class="font-semibold mb-2">{"Parameters"}</h4>
                        {table("modelParameters", &details.parameters, "No parameters")}
                    </div>
                    <div>
                        <h4 class="font-semibold mb-2">{"Metrics"}</h4>
                        {table("modelMetrics", &details.metrics, "No metrics available")}
                    </div>
                </div>
            },
            None => html! {
                <p class="text-sm text-gray-500">{"Select a model to see its parameters and metrics."}</p>
            },
        }
    };

    html! {
        <div class="card bg-base-100 shadow mt-6">
            <div class="card-body">
                <h3 class="card-title text-lg">{"Model Details"}</h3>
                {body}
            </div>
        </div>
    }
}

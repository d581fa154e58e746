use common::form::{PROPHET_GROWTH_OPTIONS, PROPHET_SEASONALITY_OPTIONS};
use common::{ForecastForm, ForecastMethod, FormError, MAX_PERIOD, MIN_PERIOD};
use web_sys::{File, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::common::loading::ButtonSpinner;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub show: bool,
    pub form: ForecastForm,
    pub submitting: bool,
    pub error: Option<FormError>,
    /// (control name, value)
    pub on_field: Callback<(&'static str, String)>,
    /// `None` when the selection was cleared
    pub on_file: Callback<Option<File>>,
    pub on_submit: Callback<()>,
    pub on_close: Callback<()>,
}

fn input_handler(on_field: &Callback<(&'static str, String)>, name: &'static str) -> Callback<InputEvent> {
    let on_field = on_field.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_field.emit((name, input.value()));
    })
}

fn select_handler(on_field: &Callback<(&'static str, String)>, name: &'static str) -> Callback<Event> {
    let on_field = on_field.clone();
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        on_field.emit((name, select.value()));
    })
}

fn options<'a>(values: impl IntoIterator<Item = &'a str>, current: &str) -> Html {
    values
        .into_iter()
        .map(|value| {
            html! { <option value={value.to_string()} selected={value == current}>{value}</option> }
        })
        .collect()
}

fn number_input(
    props: &Props,
    name: &'static str,
    label: &'static str,
    value: &str,
    min: u32,
) -> Html {
    html! {
        <div class="form-control">
            <label class="label"><span class="label-text">{label}</span></label>
            <input
                type="number"
                name={name}
                class="input input-bordered w-full"
                min={min.to_string()}
                value={value.to_string()}
                required={true}
                disabled={props.submitting}
                oninput={input_handler(&props.on_field, name)}
            />
        </div>
    }
}

fn column_select(props: &Props, name: &'static str, label: &'static str, current: &str) -> Html {
    let control = if props.form.column_options.is_empty() && !props.form.upload_section_visible() {
        // no file to read headers from; the column is typed in
        html! {
            <input
                type="text"
                name={name}
                class="input input-bordered w-full"
                value={current.to_string()}
                required={true}
                disabled={props.submitting}
                oninput={input_handler(&props.on_field, name)}
            />
        }
    } else {
        html! {
            <select
                name={name}
                class="select select-bordered w-full"
                required={true}
                disabled={props.submitting}
                onchange={select_handler(&props.on_field, name)}
            >
                {options(props.form.column_options.iter().map(String::as_str), current)}
            </select>
        }
    };

    html! {
        <div class="form-control">
            <label class="label"><span class="label-text">{label}</span></label>
            {control}
        </div>
    }
}

fn parameter_group(props: &Props, method: ForecastMethod, body: Html) -> Html {
    let visible = props.form.is_parameter_group_visible(method);
    html! {
        <div
            id={method.parameter_group_id()}
            class={classes!("parameter-group", "space-y-2", visible.then_some("active"))}
            hidden={!visible}
        >
            {body}
        </div>
    }
}

/// Modal with the "new forecast" form.
#[function_component(NewForecastModal)]
pub fn new_forecast_modal(props: &Props) -> Html {
    let form = &props.form;

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_file_change = {
        let on_file = props.on_file.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_file.emit(input.files().and_then(|files| files.get(0)));
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        let submitting = props.submitting;
        Callback::from(move |_| {
            if !submitting {
                on_close.emit(())
            }
        })
    };

    let lstm = html! {
        <div class="grid grid-cols-2 gap-4">
            {number_input(props, "lstmSequenceLength", "Sequence Length", &form.lstm_sequence_length, 1)}
            {number_input(props, "lstmEpochs", "Epochs", &form.lstm_epochs, 1)}
        </div>
    };
    let arima = html! {
        <div class="grid grid-cols-3 gap-4">
            {number_input(props, "arimaP", "p (AR order)", &form.arima_p, 0)}
            {number_input(props, "arimaD", "d (Differencing)", &form.arima_d, 0)}
            {number_input(props, "arimaQ", "q (MA order)", &form.arima_q, 0)}
        </div>
    };
    let prophet = html! {
        <div class="grid grid-cols-2 gap-4">
            <div class="form-control">
                <label class="label"><span class="label-text">{"Growth"}</span></label>
                <select name="prophetGrowth" class="select select-bordered w-full" disabled={props.submitting}
                    onchange={select_handler(&props.on_field, "prophetGrowth")}>
                    {options(PROPHET_GROWTH_OPTIONS, &form.prophet_growth)}
                </select>
            </div>
            <div class="form-control">
                <label class="label"><span class="label-text">{"Seasonality Mode"}</span></label>
                <select name="prophetSeasonality" class="select select-bordered w-full" disabled={props.submitting}
                    onchange={select_handler(&props.on_field, "prophetSeasonality")}>
                    {options(PROPHET_SEASONALITY_OPTIONS, &form.prophet_seasonality)}
                </select>
            </div>
        </div>
    };

    html! {
        <dialog class={classes!("modal", props.show.then_some("modal-open"))} id="newForecastModal">
            <div class="modal-box w-11/12 max-w-2xl">
                <h3 class="font-bold text-lg">{"New Forecast"}</h3>

                {if let Some(error) = props.error.as_ref() {
                    html! {
                        <div class="alert alert-warning mt-4" data-field={error.field}>
                            <span>{&error.message}</span>
                        </div>
                    }
                } else {
                    html! {}
                }}

                <form id="newForecastForm" onsubmit={on_submit} class="py-4 space-y-4" novalidate={true}>
                    <div class="form-control">
                        <label class="label"><span class="label-text">{"Model Name"}</span></label>
                        <input
                            type="text"
                            name="name"
                            class="input input-bordered w-full"
                            placeholder="e.g. Monthly Sales"
                            value={form.name.clone()}
                            required={true}
                            disabled={props.submitting}
                            oninput={input_handler(&props.on_field, "name")}
                        />
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Data Source"}</span></label>
                            <select name="dataSource" class="select select-bordered w-full" disabled={props.submitting}
                                onchange={select_handler(&props.on_field, "dataSource")}>
                                <option value="upload" selected={form.data_source == "upload"}>{"Upload CSV"}</option>
                                <option value="database" selected={form.data_source == "database"}>{"Database"}</option>
                            </select>
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Method"}</span></label>
                            <select name="method" class="select select-bordered w-full" disabled={props.submitting}
                                onchange={select_handler(&props.on_field, "method")}>
                                {for ForecastMethod::ALL.iter().map(|method| html! {
                                    <option value={method.as_str()} selected={form.method == method.as_str()}>
                                        {method.label()}
                                    </option>
                                })}
                            </select>
                        </div>
                    </div>

                    <div id="uploadSection" class="form-control" hidden={!form.upload_section_visible()}>
                        <label class="label"><span class="label-text">{"Data File (CSV)"}</span></label>
                        <input
                            type="file"
                            name="dataFile"
                            accept=".csv"
                            class="file-input file-input-bordered w-full"
                            disabled={props.submitting}
                            onchange={on_file_change}
                        />
                        {if let Some(file_name) = &form.file_name {
                            html! { <span class="label-text-alt mt-1">{file_name}</span> }
                        } else {
                            html! {}
                        }}
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        {column_select(props, "dateColumn", "Date Column", &form.date_column)}
                        {column_select(props, "targetColumn", "Target Column", &form.target_column)}
                    </div>

                    <div class="form-control">
                        <label class="label"><span class="label-text">{"Forecast Period"}</span></label>
                        <input
                            type="number"
                            name="period"
                            class="input input-bordered w-full"
                            min={MIN_PERIOD.to_string()}
                            max={MAX_PERIOD.to_string()}
                            value={form.period.clone()}
                            required={true}
                            disabled={props.submitting}
                            oninput={input_handler(&props.on_field, "period")}
                        />
                    </div>

                    {parameter_group(props, ForecastMethod::Lstm, lstm)}
                    {parameter_group(props, ForecastMethod::Arima, arima)}
                    {parameter_group(props, ForecastMethod::Prophet, prophet)}

                    <div class="modal-action">
                        <button type="button" class="btn" onclick={on_close.clone()} disabled={props.submitting}>
                            {"Cancel"}
                        </button>
                        <button type="submit" id="generateForecastBtn" class="btn btn-primary" disabled={props.submitting}>
                            {if props.submitting {
                                html! { <><ButtonSpinner />{" Generating..."}</> }
                            } else {
                                html! { "Generate Forecast" }
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form class="modal-backdrop" method="dialog">
                <button onclick={on_close} disabled={props.submitting}>{"close"}</button>
            </form>
        </dialog>
    }
}

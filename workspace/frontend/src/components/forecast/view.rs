use chrono::{Duration, Utc};
use common::{ApiError, Dashboard, DashboardError, FormError, ForecastApi, ModelId, NotificationKind};
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::File;
use yew::prelude::*;

use super::chart::ForecastChart;
use super::details::ModelDetails;
use super::form::NewForecastModal;
use super::models::ModelsList;
use super::stats::ForecastStats;
use crate::api_client::BrowserForecastApi;
use crate::common::toast::ToastStack;
use crate::settings;

async fn read_text(file: &File) -> Result<String, String> {
    let value = JsFuture::from(file.text())
        .await
        .map_err(|e| format!("{:?}", e))?;
    value
        .as_string()
        .ok_or_else(|| "file content is not text".to_string())
}

/// The forecasting page: model list, chart, details and the new forecast modal.
///
/// All state lives in one [`Dashboard`]; callbacks mutate it and force a
/// re-render. Borrows are never held across an await.
#[function_component(ForecastDashboard)]
pub fn forecast_dashboard() -> Html {
    let settings = settings::get_settings();
    let ttl_ms = settings.toast_duration_ms;
    let page_size = settings.models_page_size;

    let dashboard = use_mut_ref(move || {
        Dashboard::with_notification_ttl(Duration::milliseconds(i64::from(ttl_ms)))
    });
    let selected_file = use_mut_ref(|| None::<File>);
    let form_error = use_state(|| None::<FormError>);
    let force = use_force_update();

    let load_models = {
        let dashboard = dashboard.clone();
        let force = force.clone();
        Callback::from(move |page: u32| {
            let dashboard = dashboard.clone();
            let force = force.clone();
            spawn_local(async move {
                log::debug!("Loading forecast models, page {}", page);
                let outcome = BrowserForecastApi::new().list_models(page, page_size).await;
                let loaded = dashboard.borrow_mut().complete_models(outcome, Utc::now());
                if let Err(e) = loaded {
                    log::error!("Failed to load forecast models: {}", e);
                }
                force.force_update();
            });
        })
    };

    let load_statistics = {
        let dashboard = dashboard.clone();
        let force = force.clone();
        Callback::from(move |_: ()| {
            let dashboard = dashboard.clone();
            let force = force.clone();
            spawn_local(async move {
                let outcome = BrowserForecastApi::new().user_statistics().await;
                let loaded = dashboard.borrow_mut().complete_statistics(outcome, Utc::now());
                if let Err(e) = loaded {
                    log::error!("Failed to load statistics: {}", e);
                }
                force.force_update();
            });
        })
    };

    {
        let load_models = load_models.clone();
        let load_statistics = load_statistics.clone();
        use_effect_with((), move |_| {
            load_models.emit(1);
            load_statistics.emit(());
            || ()
        });
    }

    let latest_notification = dashboard.borrow().notifications().latest().map(|n| n.id);
    {
        let dashboard = dashboard.clone();
        let force = force.clone();
        use_effect_with(latest_notification, move |latest| {
            if latest.is_some() {
                Timeout::new(ttl_ms, move || {
                    if dashboard.borrow_mut().expire_notifications(Utc::now()) > 0 {
                        force.force_update();
                    }
                })
                .forget();
            }
            || ()
        });
    }

    let on_field = {
        let dashboard = dashboard.clone();
        let form_error = form_error.clone();
        let force = force.clone();
        Callback::from(move |(name, value): (&'static str, String)| {
            log::trace!("Form field {} changed", name);
            dashboard.borrow_mut().form_mut().set_field(name, value);
            form_error.set(None);
            force.force_update();
        })
    };

    let on_file = {
        let dashboard = dashboard.clone();
        let selected_file = selected_file.clone();
        let force = force.clone();
        Callback::from(move |file: Option<File>| {
            let Some(file) = file else {
                *selected_file.borrow_mut() = None;
                dashboard.borrow_mut().on_file_cleared();
                force.force_update();
                return;
            };
            *selected_file.borrow_mut() = Some(file.clone());
            let dashboard = dashboard.clone();
            let force = force.clone();
            spawn_local(async move {
                match read_text(&file).await {
                    Ok(text) => {
                        let columns = dashboard.borrow_mut().on_file_loaded(&file.name(), &text).len();
                        log::info!("Loaded {} with {} columns", file.name(), columns);
                    }
                    Err(e) => {
                        log::error!("Failed to read {}: {}", file.name(), e);
                        dashboard.borrow_mut().notify(
                            NotificationKind::Error,
                            format!("Error reading file: {}", e),
                            Utc::now(),
                        );
                    }
                }
                force.force_update();
            });
        })
    };

    let on_submit = {
        let dashboard = dashboard.clone();
        let selected_file = selected_file.clone();
        let form_error = form_error.clone();
        let load_statistics = load_statistics.clone();
        let force = force.clone();
        Callback::from(move |_| {
            let begun = dashboard.borrow_mut().begin_submission();
            match begun {
                Ok(()) => form_error.set(None),
                Err(DashboardError::Validation(err)) => {
                    log::warn!("Form validation failed: {}", err);
                    form_error.set(Some(err));
                    return;
                }
                Err(e) => {
                    log::debug!("Submission ignored: {}", e);
                    return;
                }
            }
            force.force_update();

            let dashboard = dashboard.clone();
            let selected_file = selected_file.clone();
            let form_error = form_error.clone();
            let load_statistics = load_statistics.clone();
            let force = force.clone();
            spawn_local(async move {
                let upload = dashboard.borrow().form().upload_section_visible();
                let file = selected_file.borrow().clone();
                let file_text = match (upload, file) {
                    (true, Some(file)) => match read_text(&file).await {
                        Ok(text) => Some(text),
                        Err(e) => {
                            let error = DashboardError::Transport(ApiError::Request(format!(
                                "Failed to read {}: {}",
                                file.name(),
                                e
                            )));
                            dashboard.borrow_mut().fail_submission(error, Utc::now());
                            force.force_update();
                            return;
                        }
                    },
                    _ => None,
                };

                let request = dashboard.borrow_mut().build_request(file_text.as_deref());
                let request = match request {
                    Ok(request) => request,
                    Err(e) => {
                        log::warn!("Forecast request not built: {}", e);
                        if let DashboardError::Validation(err) = e {
                            form_error.set(Some(err));
                        }
                        force.force_update();
                        return;
                    }
                };

                log::info!("Generating forecast: {}", request.name);
                let outcome = BrowserForecastApi::new().generate_forecast(&request).await;
                let completed = dashboard
                    .borrow_mut()
                    .complete_submission(&request, outcome, Utc::now());
                match completed {
                    Ok(generated) => {
                        log::info!("Forecast generated for model {}", generated.entry.id);
                        load_statistics.emit(());
                    }
                    Err(e) => log::error!("Forecast generation failed: {}", e),
                }
                force.force_update();
            });
        })
    };

    let on_select = {
        let dashboard = dashboard.clone();
        let force = force.clone();
        Callback::from(move |model_id: ModelId| {
            if let Err(e) = dashboard.borrow_mut().begin_history(&model_id) {
                log::debug!("History request for {} ignored: {}", model_id, e);
                return;
            }
            force.force_update();

            let dashboard = dashboard.clone();
            let force = force.clone();
            spawn_local(async move {
                let outcome = BrowserForecastApi::new().forecast_history(&model_id).await;
                let completed = dashboard
                    .borrow_mut()
                    .complete_history(&model_id, outcome, Utc::now());
                if let Err(e) = completed {
                    log::error!("Failed to load history of {}: {}", model_id, e);
                }
                force.force_update();
            });
        })
    };

    let on_delete = {
        let dashboard = dashboard.clone();
        let load_models = load_models.clone();
        let load_statistics = load_statistics.clone();
        let force = force.clone();
        Callback::from(move |model_id: ModelId| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Delete this forecast?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }

            let dashboard = dashboard.clone();
            let load_models = load_models.clone();
            let load_statistics = load_statistics.clone();
            let force = force.clone();
            spawn_local(async move {
                let outcome = BrowserForecastApi::new().delete_model(&model_id).await;
                let deleted = dashboard
                    .borrow_mut()
                    .complete_delete(&model_id, outcome, Utc::now());
                match deleted {
                    Ok(()) => {
                        let page = dashboard.borrow().page().map(|p| p.page).unwrap_or(1);
                        load_models.emit(page);
                        load_statistics.emit(());
                    }
                    Err(e) => log::error!("Failed to delete {}: {}", model_id, e),
                }
                force.force_update();
            });
        })
    };

    let on_open = {
        let dashboard = dashboard.clone();
        let form_error = form_error.clone();
        let force = force.clone();
        Callback::from(move |_: MouseEvent| {
            dashboard.borrow_mut().open_modal();
            form_error.set(None);
            force.force_update();
        })
    };

    let on_close = {
        let dashboard = dashboard.clone();
        let force = force.clone();
        Callback::from(move |_| {
            dashboard.borrow_mut().close_modal();
            force.force_update();
        })
    };

    let on_dismiss = {
        let dashboard = dashboard.clone();
        let force = force.clone();
        Callback::from(move |id: u64| {
            if dashboard.borrow_mut().dismiss_notification(id) {
                force.force_update();
            }
        })
    };

    let state = dashboard.borrow();
    let page = html! {
        <>
            <ToastStack
                notifications={state.notifications().entries().to_vec()}
                on_dismiss={on_dismiss}
            />
            <div class="flex justify-between items-center mb-6">
                <h2 class="text-2xl font-bold">{"Forecasts"}</h2>
                <button class="btn btn-primary" onclick={on_open}>
                    <i class="fas fa-plus"></i>
                    {" New Forecast"}
                </button>
            </div>
            <ForecastStats stats={state.statistics().cloned()} />
            <div class="grid grid-cols-1 lg:grid-cols-4 gap-6">
                <div class="lg:col-span-1">
                    <ModelsList
                        entries={state.models().entries().to_vec()}
                        page={state.page()}
                        selected={state.selected_model().cloned()}
                        loading={state.loading_model().cloned()}
                        on_select={on_select}
                        on_delete={on_delete}
                        on_page={load_models}
                    />
                </div>
                <div class="lg:col-span-3">
                    <ForecastChart chart={state.chart().cloned()} />
                    <ModelDetails
                        details={state.details().cloned()}
                        loading={state.loading_model().is_some()}
                    />
                </div>
            </div>
            <NewForecastModal
                show={state.is_modal_open()}
                form={state.form().clone()}
                submitting={state.is_submitting()}
                error={(*form_error).clone()}
                on_field={on_field}
                on_file={on_file}
                on_submit={on_submit}
                on_close={on_close}
            />
        </>
    };
    page
}

use common::{ModelId, ModelListEntry, PageInfo};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub entries: Vec<ModelListEntry>,
    pub page: Option<PageInfo>,
    pub selected: Option<ModelId>,
    pub loading: Option<ModelId>,
    pub on_select: Callback<ModelId>,
    pub on_delete: Callback<ModelId>,
    pub on_page: Callback<u32>,
}

#[function_component(ModelsList)]
pub fn models_list(props: &Props) -> Html {
    let items = props.entries.iter().map(|entry| {
        let id = entry.id.clone();
        let active = props.selected.as_ref() == Some(&id);
        let busy = props.loading.as_ref() == Some(&id);

        let on_click = {
            let on_select = props.on_select.clone();
            let id = id.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                on_select.emit(id.clone());
            })
        };
        let on_delete = {
            let on_delete = props.on_delete.clone();
            let id = id.clone();
            Callback::from(move |e: MouseEvent| {
                e.stop_propagation();
                on_delete.emit(id.clone());
            })
        };

        html! {
            <li key={id.to_string()}>
                <a href="#" data-model-id={id.to_string()} class={classes!("flex", "justify-between", active.then_some("active"))} onclick={on_click}>
                    <div class="flex flex-col">
                        <span class="font-semibold">{&entry.name}</span>
                        <span class="text-xs">{format!("{} - {}", entry.method.to_uppercase(), entry.target_column)}</span>
                        <small class="text-xs text-gray-500">{entry.created_label()}</small>
                    </div>
                    {if busy {
                        html! { <span class="loading loading-spinner loading-xs"></span> }
                    } else {
                        html! {
                            <button type="button" class="btn btn-xs btn-ghost" aria-label="Delete" onclick={on_delete}>
                                <i class="fas fa-trash"></i>
                            </button>
                        }
                    }}
                </a>
            </li>
        }
    });

    let pager = props.page.map(|page| {
        let prev = {
            let on_page = props.on_page.clone();
            Callback::from(move |_| on_page.emit(page.page.saturating_sub(1).max(1)))
        };
        let next = {
            let on_page = props.on_page.clone();
            Callback::from(move |_| on_page.emit(page.page + 1))
        };
        html! {
            <div class="join mt-4 justify-center">
                <button class="join-item btn btn-sm" onclick={prev} disabled={!page.has_previous}>{"«"}</button>
                <button class="join-item btn btn-sm btn-disabled">
                    {format!("Page {} of {}", page.page, page.total_pages.max(1))}
                </button>
                <button class="join-item btn btn-sm" onclick={next} disabled={!page.has_next}>{"»"}</button>
            </div>
        }
    });

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title text-lg">{"Forecast Models"}</h3>
                {if props.entries.is_empty() {
                    html! { <p class="text-sm text-gray-500">{"No forecasts yet."}</p> }
                } else {
                    html! {}
                }}
                <ul id="forecastModelsList" class="menu bg-base-100 w-full p-0">
                    {for items}
                </ul>
                {pager.unwrap_or_default()}
            </div>
        </div>
    }
}

use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: String,
}

#[function_component(Navbar)]
pub fn navbar(props: &Props) -> Html {
    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="flex-none px-2">
                <Link<Route> to={Route::Forecasting} classes="btn btn-ghost text-lg">
                    <i class="fas fa-chart-line"></i>
                    {" Forecasting"}
                </Link<Route>>
            </div>
            <div class="flex-1 px-4">
                <h1 class="text-xl font-bold" id="page-title">{ &props.title }</h1>
            </div>
        </div>
    }
}

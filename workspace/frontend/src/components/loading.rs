use yew::prelude::*;

/// Small inline spinner shown while a load is in flight
#[function_component(Loading)]
pub fn loading() -> Html {
    html! {
        <span class="loading loading-spinner loading-sm text-primary"></span>
    }
}

use common::STATIONS;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StationSelectProps {
    pub selected: String,
    pub on_select: Callback<String>,
}

#[function_component(StationSelect)]
pub fn station_select(props: &StationSelectProps) -> Html {
    let onchange = {
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            log::debug!("Station selector changed to {}", select.value());
            on_select.emit(select.value());
        })
    };

    html! {
        <div class="card bg-base-100 shadow-xl p-6">
            <h2 class="text-lg font-bold text-primary text-center mb-4">{"역 선택"}</h2>
            <select class="select select-bordered select-primary w-full text-center text-lg" {onchange}>
                {for STATIONS.iter().map(|station| html! {
                    <option value={*station} selected={*station == props.selected}>{*station}</option>
                })}
            </select>
        </div>
    }
}

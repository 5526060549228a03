use yew::prelude::*;
use super::chart::RidershipChart;
use super::station_select::StationSelect;
use super::stats::Stats;
use crate::components::loading::Loading;
use crate::hooks::use_dashboard;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let dashboard = use_dashboard();
    let state = &dashboard.state;

    let on_refresh = {
        let refresh = dashboard.refresh.clone();
        Callback::from(move |_: MouseEvent| {
            log::debug!("User clicked refresh button");
            refresh.emit(());
        })
    };

    html! {
        <div class="container mx-auto max-w-5xl px-4 py-12">
            <div class="text-center mb-12">
                <h1 class="text-4xl font-bold text-primary drop-shadow-md">
                    {format!("{} 시간별 승차/하차 인원", state.selected_station)}
                </h1>
                <p class="text-lg text-base-content/70 mt-4">
                    {"실시간 승/하차 데이터 기반 차트로, 역의 혼잡도와 교통카드 이용자 수를 파악하기 용이합니다."}
                </p>
            </div>

            <div class="flex justify-center">
                <div class="w-full sm:w-1/2 md:w-1/3">
                    <StationSelect selected={state.selected_station.clone()} on_select={dashboard.select.clone()} />
                </div>
            </div>

            <div class="card bg-base-100 shadow-2xl mt-12">
                <div class="card-body">
                    <div class="flex justify-center items-center gap-3 mb-4">
                        <h2 class="card-title">{"시간대별 승차/하차 인원"}</h2>
                        if state.is_loading() {
                            <Loading />
                        }
                    </div>
                    <RidershipChart series={state.series.clone()} />
                </div>
            </div>

            <Stats series={state.series.clone()} />

            <div class="text-center mt-12">
                <button class="btn btn-primary btn-lg px-10 shadow" onclick={on_refresh}>
                    {"새로고침"}
                </button>
            </div>
        </div>
    }
}

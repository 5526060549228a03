use common::{ChartDataset, ChartSeries};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatsProps {
    pub series: ChartSeries,
}

fn stat(dataset: &ChartDataset, value_class: &'static str) -> Html {
    let peak = match dataset.peak() {
        Some((hour, count)) => format!("최다 {}시 ({}명)", hour, count),
        None => "-".to_string(),
    };

    html! {
        <div class="stats shadow bg-base-100">
            <div class="stat">
                <div class="stat-title">{dataset.style.label}</div>
                <div class={classes!("stat-value", value_class)}>{dataset.total().to_string()}</div>
                <div class="stat-desc">{peak}</div>
            </div>
        </div>
    }
}

/// Monthly totals and busiest hour for each direction
#[function_component(Stats)]
pub fn stats(props: &StatsProps) -> Html {
    if props.series.is_empty() {
        return html! {};
    }

    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-4 mt-8">
            {stat(&props.series.ride_on, "text-info")}
            {stat(&props.series.ride_off, "text-error")}
        </div>
    }
}

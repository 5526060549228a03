use common::{ChartDataset, ChartSeries};
use plotly::common::{Fill, Line, Mode};
use plotly::Scatter;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

const CHART_DIV_ID: &str = "chart-ridership-hourly";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

#[derive(Properties, PartialEq)]
pub struct RidershipChartProps {
    pub series: ChartSeries,
}

fn trace(labels: &[String], dataset: &ChartDataset) -> Box<Scatter<String, u64>> {
    let style = dataset.style;
    let trace = Scatter::new(labels.to_vec(), dataset.data.clone())
        .mode(Mode::LinesMarkers)
        .name(style.label)
        .line(Line::new().color(style.border_color).width(2.0));

    if style.fill {
        trace.fill(Fill::ToZeroY).fill_color(style.background_color)
    } else {
        trace
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, String> {
    let json = serde_json::to_string(value).map_err(|e| e.to_string())?;
    js_sys::JSON::parse(&json).map_err(|e| format!("{:?}", e))
}

fn draw(series: &ChartSeries) -> Result<(), String> {
    let data = js_sys::Array::new();
    data.push(&to_js(&trace(&series.labels, &series.ride_on))?);
    data.push(&to_js(&trace(&series.labels, &series.ride_off))?);

    let layout = serde_json::json!({
        "margin": {"t": 10, "r": 10, "l": 60, "b": 40},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "xaxis": {"type": "category", "showgrid": false},
        "yaxis": {"showgrid": true, "gridcolor": "#eee", "rangemode": "tozero"},
        "showlegend": true,
        "legend": {"orientation": "h", "y": -0.2}
    });
    let config = serde_json::json!({"responsive": true, "displayModeBar": false});

    newPlot(
        CHART_DIV_ID,
        data.into(),
        serde_wasm_bindgen::to_value(&layout).map_err(|e| e.to_string())?,
        serde_wasm_bindgen::to_value(&config).map_err(|e| e.to_string())?,
    );
    Ok(())
}

/// Hourly ride-on/ride-off line chart, redrawn whenever the series changes
#[function_component(RidershipChart)]
pub fn ridership_chart(props: &RidershipChartProps) -> Html {
    let container_ref = use_node_ref();

    use_effect_with((container_ref.clone(), props.series.clone()), move |(container_ref, series)| {
        if container_ref.cast::<HtmlElement>().is_some() {
            log::trace!("Drawing chart with {} hourly points", series.labels.len());
            if let Err(err) = draw(series) {
                log::error!("Failed to draw chart: {}", err);
            }
        }
        || ()
    });

    html! {
        <div ref={container_ref} id={CHART_DIV_ID} class="chart-container" style="width:100%; height:400px;"></div>
    }
}

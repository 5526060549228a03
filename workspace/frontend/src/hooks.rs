use common::{
    is_known_station, project_station, ChartSeries, DashboardAction, DashboardState,
    LoadTicketIssuer,
};
use std::ops::Deref;
use std::rc::Rc;
use yew::prelude::*;
use crate::api_client;

/// Yew wrapper around the dashboard state machine
#[derive(Default, PartialEq)]
pub struct DashboardStore(DashboardState);

impl Deref for DashboardStore {
    type Target = DashboardState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Reducible for DashboardStore {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        log::trace!("Dashboard action: {:?}", action);
        Rc::new(DashboardStore(self.0.reduce(action)))
    }
}

/// Handle returned by [`use_dashboard`]
#[derive(Clone, PartialEq)]
pub struct DashboardHandle {
    pub state: UseReducerHandle<DashboardStore>,
    /// Switch to another station; loading follows automatically
    pub select: Callback<String>,
    /// Load the selected station again
    pub refresh: Callback<()>,
}

/// Fetch the proxy payload and project the chart of `station`
async fn load_station(station: &str) -> Result<ChartSeries, String> {
    let response = api_client::fetch_ridership().await?;
    project_station(&response.data, station).map_err(|e| e.to_string())
}

/// Owns the dashboard state: loads on mount, on every station change and on refresh.
///
/// Failed loads and unknown stations are logged and leave the chart as it was.
#[hook]
pub fn use_dashboard() -> DashboardHandle {
    let state = use_reducer(DashboardStore::default);
    let issuer = use_mut_ref(LoadTicketIssuer::default);

    let load = {
        let dispatcher = state.dispatcher();
        use_callback((), move |station: String, _| {
            let ticket = issuer.borrow_mut().issue();
            log::debug!("Load #{} for station {}", ticket.value(), station);
            dispatcher.dispatch(DashboardAction::Started(ticket));

            let dispatcher = dispatcher.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = match load_station(&station).await {
                    Ok(series) => DashboardAction::Loaded { ticket, series },
                    Err(err) => {
                        log::error!("Error fetching or processing data: {}", err);
                        DashboardAction::Failed { ticket }
                    }
                };
                dispatcher.dispatch(outcome);
            });
        })
    };

    // Load on mount and whenever the selection changes
    {
        let load = load.clone();
        use_effect_with(state.selected_station.clone(), move |station| {
            load.emit(station.clone());
            || ()
        });
    }

    let select = {
        let dispatcher = state.dispatcher();
        Callback::from(move |station: String| {
            if is_known_station(&station) {
                dispatcher.dispatch(DashboardAction::Select(station));
            } else {
                log::warn!("Ignoring unknown station: {}", station);
            }
        })
    };

    let refresh = use_callback(state.selected_station.clone(), move |_: (), station| {
        log::debug!("Refresh requested for {}", station);
        load.emit(station.clone());
    });

    DashboardHandle { state, select, refresh }
}

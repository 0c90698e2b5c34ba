use chrono::NaiveDate;
use ecodrive_core::{connection::ConnectionSimulator, selector::{DayCell, TripSelector}};
use ecodrive_lib::{connection_state::ConnectionState, trip::TripRecord, view_mode::ViewMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    pub selected_date: NaiveDate,
    pub view_mode: ViewMode,
    pub week: Vec<DayCell>,
    pub trips: Vec<TripRow>,
    pub eco_coins_total: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRow {
    #[serde(flatten)]
    pub trip: TripRecord,
    pub show_time_header: bool,
    pub eco_coins_label: String,
}

impl HistoryView {
    pub fn of(selector: &TripSelector) -> Self {
        let trips = selector.trips()
            .iter()
            .zip(selector.time_headers())
            .map(|(trip, show_time_header)| TripRow {
                trip: trip.clone(),
                show_time_header,
                eco_coins_label: trip.eco_coins_label(),
            })
            .collect();

        Self {
            selected_date: selector.selected_date(),
            view_mode: selector.view_mode(),
            week: selector.week_days().to_vec(),
            trips,
            eco_coins_total: selector.eco_coins_total(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionView {
    pub state: ConnectionState,
    pub label: &'static str,
    pub device_ready: bool,
}

impl ConnectionView {
    pub fn of(connection: &ConnectionSimulator) -> Self {
        let state = connection.state();
        Self {
            state,
            label: state.status_label(),
            device_ready: state.is_device_ready(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleView {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub status: ConnectionView,
}

#[derive(Debug, Deserialize)]
pub struct ViewModeRequest {
    pub mode: ViewMode,
}

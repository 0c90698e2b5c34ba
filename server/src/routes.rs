use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{from_fn, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use ecodrive_core::{selector::TripDetails, ConnectionError};
use ecodrive_lib::date_input::DateInput;

use crate::{server_state::ServerState, views::{ConnectionView, HistoryView, ToggleView, ViewModeRequest}};

pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/history", get(get_history))
        .route("/history/select", post(select_date))
        .route("/history/view_mode", post(set_view_mode))
        .route("/history/week/previous", post(previous_week))
        .route("/history/week/next", post(next_week))
        .route("/history/today", post(go_to_today))
        .route("/trip/{trip_id}", get(get_trip))
        .route("/connection", get(get_connection))
        .route("/connection/toggle", post(toggle_connection))
        .with_state(state)
        .layer(from_fn(log_request))
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;
    tracing::debug!("{} {} -> {}", method, path, response.status());
    response
}

pub async fn get_history(State(state): State<Arc<ServerState>>) -> Json<HistoryView> {
    let selector = state.selector.lock().await;
    Json(HistoryView::of(&selector))
}

/// Accepts any JSON. Bodies without a usable date leave the history as it was.
pub async fn select_date(State(state): State<Arc<ServerState>>, Json(input): Json<DateInput>) -> Json<HistoryView> {
    let mut selector = state.selector.lock().await;
    selector.select_date(input);
    Json(HistoryView::of(&selector))
}

pub async fn set_view_mode(State(state): State<Arc<ServerState>>, Json(request): Json<ViewModeRequest>) -> Json<HistoryView> {
    let mut selector = state.selector.lock().await;
    selector.set_view_mode(request.mode);
    Json(HistoryView::of(&selector))
}

pub async fn previous_week(State(state): State<Arc<ServerState>>) -> Json<HistoryView> {
    let mut selector = state.selector.lock().await;
    selector.go_to_previous_week();
    Json(HistoryView::of(&selector))
}

pub async fn next_week(State(state): State<Arc<ServerState>>) -> Json<HistoryView> {
    let mut selector = state.selector.lock().await;
    selector.go_to_next_week();
    Json(HistoryView::of(&selector))
}

pub async fn go_to_today(State(state): State<Arc<ServerState>>) -> Json<HistoryView> {
    let mut selector = state.selector.lock().await;
    selector.go_to_today();
    Json(HistoryView::of(&selector))
}

pub async fn get_trip(State(state): State<Arc<ServerState>>, Path(trip_id): Path<String>) -> Result<Json<TripDetails>, StatusCode> {
    let selector = state.selector.lock().await;
    match selector.trip_details(&trip_id) {
        Some(details) => Ok(Json(details)),
        None => {
            tracing::warn!("No trip with id {}", trip_id);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

pub async fn get_connection(State(state): State<Arc<ServerState>>) -> Json<ConnectionView> {
    Json(ConnectionView::of(&state.connection))
}

/// Holds the request for the whole handshake. Other routes keep answering meanwhile.
///
/// The handshake runs on its own task, so a client hanging up does not cancel it.
pub async fn toggle_connection(State(state): State<Arc<ServerState>>) -> Result<Json<ToggleView>, (StatusCode, Json<ConnectionView>)> {
    let handshake = tokio::spawn({
        let state = state.clone();
        async move { state.connection.toggle_connection().await }
    });

    let result = match handshake.await {
        Ok(result) => result,
        Err(err) => {
            tracing::error!("Handshake task failed: {}", err);
            return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(ConnectionView::of(&state.connection))));
        }
    };

    let (connected, error) = match result {
        Ok(connected) => (connected, None),
        Err(ConnectionError::AlreadyConnecting) => {
            return Err((StatusCode::CONFLICT, Json(ConnectionView::of(&state.connection))));
        }
        Err(err) => (false, Some(err.to_string())),
    };

    Ok(Json(ToggleView {
        connected,
        error,
        status: ConnectionView::of(&state.connection),
    }))
}

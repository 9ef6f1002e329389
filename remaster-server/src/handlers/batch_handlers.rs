use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use remaster_core::batch::{BatchStatus, StartOptions};

use crate::{errors::AppResult, state::AppState};

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub started: bool,
    /// Edit link of the first item, absent when the selection was empty.
    pub next: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NextResponse {
    /// Edit link of the next item, absent once the pass is complete.
    pub next: Option<String>,
}

/// Begin a new pass over the selected items
pub async fn start_pass_handler(
    State(state): State<AppState>,
    Json(options): Json<StartOptions>,
) -> AppResult<Json<StartResponse>> {
    let next = state.cursor.start(&options).await?;

    Ok(Json(StartResponse {
        started: next.is_some(),
        next,
    }))
}

/// Advance the running pass to its next item
pub async fn next_item_handler(State(state): State<AppState>) -> AppResult<Json<NextResponse>> {
    let next = state.cursor.next().await?;

    Ok(Json(NextResponse { next }))
}

/// Abort the running pass and reset to idle
pub async fn stop_pass_handler(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.cursor.stop().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Read-only snapshot of the pass state
pub async fn pass_status_handler(
    State(state): State<AppState>,
) -> AppResult<Json<BatchStatus>> {
    Ok(Json(state.cursor.status().await?))
}

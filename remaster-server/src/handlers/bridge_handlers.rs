use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use remaster_core::links::active_item_param;

use crate::{errors::AppResult, state::AppState};

/// Script-context payload injected into an edit view that is the active
/// target of a running pass.
#[derive(Debug, Serialize)]
pub struct BridgePayload {
    /// Edit link of the next item, absent once the pass is complete.
    pub next: Option<String>,
    /// Milliseconds the client script waits before saving the active item.
    pub save_delay: u64,
}

/// Client bridge: responds with the pass payload when the request carries a
/// non-zero active-client marker and a pass is running, 204 otherwise.
pub async fn client_bridge_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Response> {
    let Some(item) = active_item_param(&params) else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    if !state.cursor.is_running().await? {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let payload = BridgePayload {
        next: state.cursor.next().await?,
        save_delay: state.save_delay.save_delay_ms(item),
    };

    Ok(Json(payload).into_response())
}

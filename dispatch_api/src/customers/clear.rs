use std::sync::Arc;

use axum::{Json, extract::State};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::info;

use crate::state::AppState;

#[derive(Serialize, JsonSchema)]
pub struct RemovedResponse {
    pub removed: usize,
}

pub async fn clear_handler(State(state): State<Arc<AppState>>) -> Json<RemovedResponse> {
    let removed = state.store.clear();
    info!("Cleared {} customers", removed);

    Json(RemovedResponse { removed })
}

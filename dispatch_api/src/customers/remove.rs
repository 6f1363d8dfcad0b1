use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use dispatch_matrix_providers::coordinates::Coordinates;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::{customers::clear::RemovedResponse, error::ApiError, state::AppState};

#[derive(Deserialize, JsonSchema)]
pub struct RemoveRequest {
    pub coordinates: Vec<Coordinates>,
}

pub async fn remove_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RemoveRequest>, JsonRejection>,
) -> Result<Json<RemovedResponse>, ApiError> {
    let Json(request) = body?;
    let removed = state.store.remove_by_coordinates(&request.coordinates);
    info!(
        "Removed {} customers matching {} locations",
        removed,
        request.coordinates.len()
    );

    Ok(Json(RemovedResponse { removed }))
}

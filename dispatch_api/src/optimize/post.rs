use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dispatch_optimizer::{
    planner::{DispatchOutcome, DispatchPlan},
    problem::customer::Customer,
};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::{info, warn};

use crate::{error::ApiError, state::AppState};

#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InfeasibleResponse {
    pub error: String,
    pub removed_customers: Vec<Customer>,
}

pub enum OptimizeResponse {
    Solved(DispatchPlan),
    Infeasible(InfeasibleResponse),
}

impl IntoResponse for OptimizeResponse {
    fn into_response(self) -> Response {
        match self {
            OptimizeResponse::Solved(plan) => (StatusCode::OK, Json(plan)).into_response(),
            OptimizeResponse::Infeasible(body) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
        }
    }
}

pub async fn post_handler(
    State(state): State<Arc<AppState>>,
) -> Result<OptimizeResponse, ApiError> {
    let _solving = state.solve_lock.lock().await;

    let customers = state.store.snapshot();
    info!("Optimizing routes for {} customers", customers.len());

    match state.planner.plan(&customers).await? {
        DispatchOutcome::Solved(plan) => Ok(OptimizeResponse::Solved(plan)),
        DispatchOutcome::Infeasible { rejected } => {
            warn!("No solution found for {} customers", customers.len());
            Ok(OptimizeResponse::Infeasible(InfeasibleResponse {
                error: "No solution found".to_string(),
                removed_customers: rejected,
            }))
        }
    }
}

use axum::Json;
use dispatch_optimizer::{planner::DispatchPlan, problem::customer::CustomerInput};
use schemars::schema_for;
use serde_json::{Value, json};

use crate::{
    customers::{clear::RemovedResponse, post::PostResponse, remove::RemoveRequest},
    error::ErrorBody,
    optimize::post::InfeasibleResponse,
};

/// JSON schemas of the request and response bodies.
pub async fn schema_handler() -> Json<Value> {
    Json(json!({
        "customer": schema_for!(CustomerInput),
        "addCustomerResponse": schema_for!(PostResponse),
        "removeCustomersRequest": schema_for!(RemoveRequest),
        "removedResponse": schema_for!(RemovedResponse),
        "optimizeResponse": schema_for!(DispatchPlan),
        "infeasibleResponse": schema_for!(InfeasibleResponse),
        "error": schema_for!(ErrorBody),
    }))
}

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use dispatch_optimizer::problem::customer::{Customer, CustomerInput};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::info;

use crate::{error::ApiError, state::AppState};

#[derive(Serialize, JsonSchema)]
pub struct PostResponse {
    pub message: String,
}

pub async fn post_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CustomerInput>, JsonRejection>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let Json(input) = body?;
    let customer = Customer::try_from(input)?;

    info!(
        "Customer {} added at {} ({} kg, due {})",
        customer.name(),
        customer.location(),
        customer.weight(),
        customer.deadline()
    );
    state.store.add(customer);

    Ok((
        StatusCode::CREATED,
        Json(PostResponse {
            message: "Customer added successfully".to_string(),
        }),
    ))
}

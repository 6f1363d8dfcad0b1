use std::sync::Arc;

use axum::{Json, extract::State};
use dispatch_optimizer::problem::customer::Customer;

use crate::state::AppState;

pub async fn list_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Customer>> {
    Json(state.store.snapshot())
}

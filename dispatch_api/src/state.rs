use dispatch_matrix_providers::travel_matrix_client::TravelMatrixClient;
use dispatch_optimizer::{planner::DispatchPlanner, store::CustomerStore};
use tokio::sync::Mutex;

use crate::config::AppConfig;

pub struct AppState {
    pub store: CustomerStore,
    pub planner: DispatchPlanner<TravelMatrixClient>,
    /// Held for the duration of a solve, one solve runs at a time.
    pub solve_lock: Mutex<()>,
}

impl AppState {
    pub fn new(planner: DispatchPlanner<TravelMatrixClient>) -> Self {
        AppState {
            store: CustomerStore::new(),
            planner,
            solve_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let client = TravelMatrixClient::new(config.provider, config.client_settings)?;

        Ok(AppState::new(
            DispatchPlanner::new(client, config.fleet).with_depot(config.depot),
        ))
    }
}

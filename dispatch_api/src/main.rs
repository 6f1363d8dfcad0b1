mod config;
mod customers;
mod error;
mod optimize;
mod routes;
mod schema;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::serve;
use mimalloc::MiMalloc;
use tracing::{Level, info};

use crate::{config::AppConfig, routes::app, state::AppState};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::from_env()?;
    let bind_address = config.bind_address.clone();
    let state = Arc::new(AppState::from_config(config)?);

    info!(
        "Serving {} vehicles ({} total capacity), matrix provider {}",
        state.planner.fleet().len(),
        state.planner.fleet().total_capacity(),
        state.planner.provider().name()
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    info!("Listening on {}", bind_address);

    serve(listener, app(state)).await?;

    Ok(())
}

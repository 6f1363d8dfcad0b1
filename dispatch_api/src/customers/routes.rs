use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    customers::{
        clear::clear_handler, list::list_handler, post::post_handler, remove::remove_handler,
    },
    state::AppState,
};

pub fn customer_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/customers",
            get(list_handler).post(post_handler).delete(clear_handler),
        )
        .route("/customers/remove", post(remove_handler))
        .route("/add_customer", post(post_handler))
}

use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    customers::routes::customer_routes, optimize::post::post_handler, schema::schema_handler,
    state::AppState,
};

pub fn app(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .merge(customer_routes())
        .route("/optimize", post(post_handler))
        .route("/schema", get(schema_handler))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use dispatch_matrix_providers::{
        coordinates::Coordinates,
        custom_matrix::CustomMatrix,
        travel_matrix_client::{TravelMatrixClient, TravelMatrixClientSettings},
        travel_matrix_provider::TravelMatrixProvider,
    };
    use dispatch_optimizer::{planner::DispatchPlanner, problem::vehicle::Fleet};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    const BRUSSELS: Coordinates = Coordinates::new(50.8467, 4.3525);

    fn state_with(provider: TravelMatrixProvider) -> Arc<AppState> {
        let client =
            TravelMatrixClient::new(provider, TravelMatrixClientSettings::default()).unwrap();

        Arc::new(AppState::new(
            DispatchPlanner::new(client, Fleet::default()).with_depot(Some(BRUSSELS)),
        ))
    }

    fn state() -> Arc<AppState> {
        state_with(TravelMatrixProvider::AsTheCrowFlies { speed_kmh: 50.0 })
    }

    async fn send(
        state: &Arc<AppState>,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(body.map_or_else(Body::empty, |body| Body::from(body.to_string())))
            .unwrap();

        let response = app(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }

    fn customer(name: &str, lat: f64, lng: f64, weight: Value, deadline: &str) -> Value {
        json!({ "name": name, "lat": lat, "lng": lng, "weight": weight, "deadline": deadline })
    }

    #[tokio::test]
    async fn test_add_and_list_customers() {
        let state = state();

        let (status, body) = send(
            &state,
            Method::POST,
            "/customers",
            Some(customer("Bakery", 50.85, 4.36, json!(400), "10:00")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Customer added successfully");

        let (status, body) = send(
            &state,
            Method::POST,
            "/add_customer",
            Some(customer("Florist", 50.84, 4.34, json!("250"), "11:30")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");

        let (status, body) = send(&state, Method::GET, "/customers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "name": "Bakery", "lat": 50.85, "lng": 4.36, "weight": 400, "deadline": "10:00" },
                { "name": "Florist", "lat": 50.84, "lng": 4.34, "weight": 250, "deadline": "11:30" }
            ])
        );
    }

    #[tokio::test]
    async fn test_invalid_customer_is_bad_request() {
        let state = state();

        let (status, body) = send(
            &state,
            Method::POST,
            "/customers",
            Some(customer("Bakery", 50.85, 4.36, json!("heavy"), "10:00")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("weight"));

        let (status, body) = send(
            &state,
            Method::POST,
            "/customers",
            Some(json!({ "name": "Bakery", "weight": 10, "deadline": "10:00" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        assert!(state.store.is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let state = state();
        for (name, lat, lng) in [("A", 50.85, 4.36), ("B", 50.84, 4.34), ("C", 50.85, 4.36)] {
            send(
                &state,
                Method::POST,
                "/customers",
                Some(customer(name, lat, lng, json!(10), "10:00")),
            )
            .await;
        }

        let (status, body) = send(
            &state,
            Method::POST,
            "/customers/remove",
            Some(json!({ "coordinates": [{ "lat": 50.85, "lng": 4.36 }] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "removed": 2 }));

        let (status, body) = send(&state, Method::DELETE, "/customers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "removed": 1 }));
        assert!(state.store.is_empty());
    }

    #[tokio::test]
    async fn test_optimize_without_customers() {
        let state = state();

        let (status, body) = send(&state, Method::POST, "/optimize", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No customers to route");
    }

    #[tokio::test]
    async fn test_optimize_routes_customers() {
        let state = state();
        send(
            &state,
            Method::POST,
            "/customers",
            Some(customer("Bakery", 50.85, 4.36, json!(400), "10:00")),
        )
        .await;
        send(
            &state,
            Method::POST,
            "/customers",
            Some(customer("Depot overflow", 50.84, 4.34, json!(6000), "11:00")),
        )
        .await;

        let (status, body) = send(&state, Method::POST, "/optimize", None).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        let routes = body["routes"].as_array().unwrap();
        assert_eq!(routes.len(), 4);
        assert_eq!(routes[0]["vehicle"], 1);
        assert_eq!(routes[0]["route"], json!(["Bakery"]));
        assert_eq!(routes[0]["load"], 400);
        assert!(routes[0]["travelTime"].as_u64().unwrap() > 0);
        assert_eq!(routes[1]["route"], json!([]));
        assert_eq!(body["removedCustomers"][0]["name"], "Depot overflow");

        // solving leaves the store untouched
        assert_eq!(state.store.len(), 2);
    }

    #[tokio::test]
    async fn test_optimize_infeasible() {
        let state = state();
        send(
            &state,
            Method::POST,
            "/customers",
            Some(customer("Antwerp", 51.2194, 4.4025, json!(100), "00:30")),
        )
        .await;

        let (status, body) = send(&state, Method::POST, "/optimize", None).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
        assert_eq!(body["error"], "No solution found");
        assert_eq!(body["removedCustomers"], json!([]));
    }

    #[tokio::test]
    async fn test_optimize_upstream_failure() {
        let state = state_with(TravelMatrixProvider::Custom {
            matrix: CustomMatrix {
                locations: vec![BRUSSELS],
                durations: vec![vec![Some(0)]],
            },
        });
        send(
            &state,
            Method::POST,
            "/customers",
            Some(customer("Bakery", 50.85, 4.36, json!(400), "10:00")),
        )
        .await;

        let (status, body) = send(&state, Method::POST, "/optimize", None).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("distance matrix"));
    }

    #[tokio::test]
    async fn test_schema() {
        let state = state();

        let (status, body) = send(&state, Method::GET, "/schema", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["customer"]["properties"]["deadline"].is_object());
        assert!(body["optimizeResponse"]["properties"]["removedCustomers"].is_object());
    }
}

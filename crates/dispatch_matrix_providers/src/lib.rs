pub mod as_the_crow_flies;
pub mod coordinates;
pub mod custom_matrix;
pub mod distance_matrix_provider;
pub mod error;
pub mod google_api;
pub mod retry;
pub mod travel_matrix_client;
pub mod travel_matrix_provider;

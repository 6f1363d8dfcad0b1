pub mod customer;
pub mod deadline;
pub mod distance_matrix;
pub mod error;
pub mod routing_problem;
pub mod time_window;
pub mod vehicle;

pub mod feasibility_filter;
pub mod matrix_acquisition;
pub mod planner;
pub mod problem;
pub mod route_extractor;
pub mod solver;
pub mod store;
mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

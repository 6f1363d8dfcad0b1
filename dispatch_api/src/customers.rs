pub mod clear;
pub mod list;
pub mod post;
pub mod remove;
pub mod routes;

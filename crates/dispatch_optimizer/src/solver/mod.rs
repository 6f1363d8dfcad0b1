pub mod assignment;
pub mod path_cheapest_arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{problem::routing_problem::RoutingProblem, solver::assignment::Assignment};

/// How the first solution is constructed.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Extend each route with the cheapest feasible arc from its last node.
    #[default]
    PathCheapestArc,
}

/// A routing search engine.
///
/// Returns `None` when no assignment visiting every customer node while
/// honoring the capacity and time dimensions was found.
pub trait RoutingSolver {
    fn solve(&self, problem: &RoutingProblem, strategy: SearchStrategy) -> Option<Assignment>;
}

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use crate::{
    problem::{
        distance_matrix::Cost,
        routing_problem::{NodeIdx, RoutingProblem},
        vehicle::VehicleIdx,
    },
    solver::{RoutingSolver, SearchStrategy, assignment::Assignment},
};

/// Greedy first-solution construction.
///
/// Vehicles are filled one after the other. Each route starts at the depot
/// and is extended with the cheapest arc to an unvisited node that keeps the
/// load within capacity, reaches the node before its deadline and still lets
/// the vehicle return to the depot within the horizon. Ties go to the lowest
/// node index, so the result is deterministic.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathCheapestArcSolver;

struct RouteState {
    node: NodeIdx,
    load: u64,
    time: u64,
}

impl PathCheapestArcSolver {
    pub fn new() -> Self {
        PathCheapestArcSolver
    }

    fn cheapest_feasible_arc(
        problem: &RoutingProblem,
        vehicle: VehicleIdx,
        state: &RouteState,
        visited: &FixedBitSet,
    ) -> Option<(NodeIdx, u64)> {
        let capacity = problem.vehicle_capacity(vehicle);
        let time_dimension = problem.time_dimension();
        let depot = problem.depot();
        let mut best: Option<(NodeIdx, Cost, u64)> = None;

        for candidate in problem.customer_nodes() {
            if visited.contains(candidate.get()) {
                continue;
            }

            if state.load.saturating_add(problem.demand(candidate)) > capacity {
                continue;
            }

            let arrival = state
                .time
                .saturating_add(problem.time_transit(state.node, candidate));
            let Some(cumul) = time_dimension.cumul_at(arrival, problem.time_window(candidate))
            else {
                continue;
            };

            let back_at_depot = cumul.saturating_add(problem.time_transit(candidate, depot));
            if time_dimension
                .cumul_at(back_at_depot, problem.time_window(depot))
                .is_none()
            {
                continue;
            }

            let cost = problem.transit_cost(state.node, candidate);
            if best.is_none_or(|(_, best_cost, _)| cost < best_cost) {
                best = Some((candidate, cost, cumul));
            }
        }

        best.map(|(node, _, cumul)| (node, cumul))
    }
}

impl RoutingSolver for PathCheapestArcSolver {
    #[instrument(skip_all, level = "debug")]
    fn solve(&self, problem: &RoutingProblem, strategy: SearchStrategy) -> Option<Assignment> {
        match strategy {
            SearchStrategy::PathCheapestArc => self.construct(problem),
        }
    }
}

impl PathCheapestArcSolver {
    fn construct(&self, problem: &RoutingProblem) -> Option<Assignment> {
        let mut visited = FixedBitSet::with_capacity(problem.num_nodes());
        visited.insert(problem.depot().get());

        let mut paths: Vec<Vec<NodeIdx>> = Vec::with_capacity(problem.num_vehicles());
        let mut remaining = problem.num_nodes() - 1;

        for vehicle in VehicleIdx::range(problem.num_vehicles()) {
            let mut path = Vec::new();
            let mut state = RouteState {
                node: problem.depot(),
                load: 0,
                time: 0,
            };

            while remaining > 0 {
                let Some((next, cumul)) =
                    PathCheapestArcSolver::cheapest_feasible_arc(problem, vehicle, &state, &visited)
                else {
                    break;
                };

                visited.insert(next.get());
                remaining -= 1;
                state = RouteState {
                    node: next,
                    load: state.load + problem.demand(next),
                    time: cumul,
                };
                path.push(next);
            }

            debug!(
                "Vehicle {}: {} stops, load {}/{}",
                vehicle,
                path.len(),
                state.load,
                problem.vehicle_capacity(vehicle)
            );
            paths.push(path);
        }

        if remaining > 0 {
            debug!("{} customer nodes could not be routed", remaining);
            return None;
        }

        Some(Assignment::from_paths(problem.num_nodes(), &paths))
    }
}

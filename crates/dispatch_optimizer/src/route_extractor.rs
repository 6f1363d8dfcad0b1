use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    problem::{
        customer::Customer,
        deadline::Deadline,
        routing_problem::{NodeIdx, RoutingProblem},
        vehicle::VehicleIdx,
    },
    solver::assignment::{Assignment, PathStep},
};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub name: String,
    /// Seconds since the route start.
    pub arrival: u64,
    #[schemars(with = "String")]
    pub deadline: Deadline,
    /// Load delivered so far, this stop included.
    pub load: u64,
}

/// Ordered visits of one vehicle, depot excluded.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRoute {
    /// 1-based vehicle number.
    pub vehicle: usize,
    pub capacity: u64,
    pub route: Vec<String>,
    pub stops: Vec<RouteStop>,
    pub load: u64,
    /// Seconds from leaving the depot until returning to it.
    pub travel_time: u64,
}

impl VehicleRoute {
    pub fn empty(vehicle: VehicleIdx, capacity: u64) -> Self {
        VehicleRoute {
            vehicle: vehicle.get() + 1,
            capacity,
            route: vec![],
            stops: vec![],
            load: 0,
            travel_time: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }
}

/// Converts the solver assignment into one route per vehicle.
///
/// `customers` must be the list `problem` was built from.
pub fn extract_routes(
    problem: &RoutingProblem,
    assignment: &Assignment,
    customers: &[Customer],
) -> Vec<VehicleRoute> {
    VehicleIdx::range(assignment.num_vehicles())
        .map(|vehicle| extract_route(problem, assignment, customers, vehicle))
        .collect()
}

fn extract_route(
    problem: &RoutingProblem,
    assignment: &Assignment,
    customers: &[Customer],
    vehicle: VehicleIdx,
) -> VehicleRoute {
    let mut stops = Vec::new();
    let mut previous = problem.depot();
    let mut time = 0u64;
    let mut load = 0u64;

    let mut step = assignment.next(vehicle, assignment.start(vehicle));
    while !assignment.is_end(step) {
        let PathStep::Visit(node) = step else {
            break;
        };

        time = arrival_at(problem, previous, node, time);
        previous = node;

        if let Some(customer) = problem
            .customer_index(node)
            .and_then(|index| customers.get(index))
        {
            load += customer.weight();
            stops.push(RouteStop {
                name: customer.name().to_string(),
                arrival: time,
                deadline: customer.deadline(),
                load,
            });
        }

        step = assignment.next(vehicle, step);
    }

    let travel_time = if stops.is_empty() {
        0
    } else {
        time + problem.time_transit(previous, problem.depot())
    };

    VehicleRoute {
        vehicle: vehicle.get() + 1,
        capacity: problem.vehicle_capacity(vehicle),
        route: stops.iter().map(|stop| stop.name.clone()).collect(),
        stops,
        load,
        travel_time,
    }
}

fn arrival_at(problem: &RoutingProblem, from: NodeIdx, to: NodeIdx, time: u64) -> u64 {
    let arrival = time + problem.time_transit(from, to);
    arrival.max(problem.time_window(to).earliest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_customer, create_fleet, line_matrix};

    fn setup() -> (Vec<Customer>, RoutingProblem) {
        let customers = vec![
            create_customer("A", 0.0, 1.0, 400, "10:00"),
            create_customer("B", 0.0, 2.0, 300, "11:00"),
            create_customer("C", 0.0, 3.0, 200, "09:30"),
        ];
        let problem = RoutingProblem::build(
            &customers,
            &create_fleet(&[1000, 500]),
            line_matrix(&[0, 1, 2, 3], 60),
        )
        .unwrap();

        (customers, problem)
    }

    fn nodes(indices: &[usize]) -> Vec<NodeIdx> {
        indices.iter().map(|&index| NodeIdx::new(index)).collect()
    }

    #[test]
    fn test_routes_follow_assignment() {
        let (customers, problem) = setup();
        let assignment = Assignment::from_paths(4, &[nodes(&[3, 1]), nodes(&[2])]);

        let routes = extract_routes(&problem, &assignment, &customers);

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].vehicle, 1);
        assert_eq!(routes[0].route, vec!["C", "A"]);
        assert_eq!(routes[0].load, 600);
        assert_eq!(routes[0].capacity, 1000);
        assert_eq!(routes[1].vehicle, 2);
        assert_eq!(routes[1].route, vec!["B"]);
        assert_eq!(routes[1].load, 300);
    }

    #[test]
    fn test_arrival_and_travel_time() {
        let (customers, problem) = setup();
        let assignment = Assignment::from_paths(4, &[nodes(&[3, 1]), vec![]]);

        let routes = extract_routes(&problem, &assignment, &customers);
        let stops = &routes[0].stops;

        // depot -> C is 180s, C -> A is 120s, A -> depot is 60s
        assert_eq!(stops[0].arrival, 180);
        assert_eq!(stops[0].load, 200);
        assert_eq!(stops[1].arrival, 300);
        assert_eq!(stops[1].load, 600);
        assert_eq!(routes[0].travel_time, 360);
    }

    #[test]
    fn test_empty_route() {
        let (customers, problem) = setup();
        let assignment = Assignment::from_paths(4, &[nodes(&[1, 2, 3]), vec![]]);

        let routes = extract_routes(&problem, &assignment, &customers);

        assert!(routes[1].is_empty());
        assert_eq!(routes[1].load, 0);
        assert_eq!(routes[1].travel_time, 0);
    }

    #[test]
    fn test_depot_is_never_listed() {
        let (customers, problem) = setup();
        let assignment = Assignment::from_paths(4, &[nodes(&[1, 2, 3]), vec![]]);

        let routes = extract_routes(&problem, &assignment, &customers);

        for route in &routes {
            assert!(route.stops.iter().all(|stop| stop.arrival > 0));
            assert_eq!(route.route.len(), route.stops.len());
        }
        assert_eq!(routes[0].route, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_serialized_shape() {
        let (customers, problem) = setup();
        let assignment = Assignment::from_paths(4, &[nodes(&[2]), vec![]]);

        let routes = extract_routes(&problem, &assignment, &customers);
        let value = serde_json::to_value(&routes[0]).unwrap();

        assert_eq!(value["vehicle"], 1);
        assert_eq!(value["route"], serde_json::json!(["B"]));
        assert_eq!(value["travelTime"], 240);
        assert_eq!(value["stops"][0]["deadline"], "11:00");
    }
}

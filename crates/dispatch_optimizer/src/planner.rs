use dispatch_matrix_providers::{
    coordinates::Coordinates, distance_matrix_provider::DistanceMatrixProvider,
    error::MatrixProviderError,
};
use schemars::JsonSchema;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::{
    feasibility_filter::filter_by_capacity,
    matrix_acquisition::fetch_distance_matrix,
    problem::{
        customer::{Customer, CustomerError, CustomerInput},
        error::ProblemError,
        routing_problem::RoutingProblem,
        vehicle::{Fleet, VehicleIdx},
    },
    route_extractor::{VehicleRoute, extract_routes},
    solver::{RoutingSolver, SearchStrategy, path_cheapest_arc::PathCheapestArcSolver},
};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No customers to route")]
    NoCustomers,

    #[error(transparent)]
    InvalidCustomer(#[from] CustomerError),

    #[error("Failed to fetch the distance matrix: {0}")]
    Upstream(#[from] MatrixProviderError),

    #[error("Invalid routing problem: {0}")]
    Problem(#[from] ProblemError),
}

/// Routes for the admitted customers.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchPlan {
    pub routes: Vec<VehicleRoute>,
    #[serde(rename = "removedCustomers")]
    pub rejected: Vec<Customer>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Solved(DispatchPlan),
    /// The admitted customers cannot all be served within their deadlines.
    Infeasible { rejected: Vec<Customer> },
}

/// Runs a solve: capacity filtering, matrix acquisition, problem
/// construction, search and route extraction.
///
/// Without a configured depot the first admitted customer's location is used
/// as the depot. That customer is still delivered.
pub struct DispatchPlanner<P> {
    provider: P,
    solver: PathCheapestArcSolver,
    fleet: Fleet,
    depot: Option<Coordinates>,
    strategy: SearchStrategy,
}

impl<P> DispatchPlanner<P>
where
    P: DistanceMatrixProvider,
{
    pub fn new(provider: P, fleet: Fleet) -> Self {
        DispatchPlanner {
            provider,
            solver: PathCheapestArcSolver::new(),
            fleet,
            depot: None,
            strategy: SearchStrategy::default(),
        }
    }

    pub fn with_depot(mut self, depot: Option<Coordinates>) -> Self {
        self.depot = depot;
        self
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn depot(&self) -> Option<&Coordinates> {
        self.depot.as_ref()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Validates raw customer input, then plans.
    pub async fn plan_inputs(
        &self,
        inputs: Vec<CustomerInput>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let customers = inputs
            .into_iter()
            .map(Customer::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        self.plan(&customers).await
    }

    #[instrument(skip_all, fields(customers = customers.len()))]
    pub async fn plan(&self, customers: &[Customer]) -> Result<DispatchOutcome, DispatchError> {
        if customers.is_empty() {
            return Err(DispatchError::NoCustomers);
        }

        let admission = filter_by_capacity(customers, self.fleet.total_capacity());

        let Some(first) = admission.admitted.first() else {
            info!(
                "No customer fits in the fleet, {} rejected",
                admission.rejected.len()
            );
            return Ok(DispatchOutcome::Solved(DispatchPlan {
                routes: self.empty_routes(),
                rejected: admission.rejected,
            }));
        };

        let depot = self.depot.unwrap_or(*first.location());
        debug!("Depot at {}", depot);

        let locations: Vec<Coordinates> = std::iter::once(depot)
            .chain(admission.admitted.iter().map(|customer| *customer.location()))
            .collect();

        let matrix = fetch_distance_matrix(&self.provider, &locations).await?;
        let problem = RoutingProblem::build(&admission.admitted, &self.fleet, matrix)?;

        let Some(assignment) = self.solver.solve(&problem, self.strategy) else {
            info!(
                "No feasible routes for {} customers",
                admission.admitted.len()
            );
            return Ok(DispatchOutcome::Infeasible {
                rejected: admission.rejected,
            });
        };

        let routes = extract_routes(&problem, &assignment, &admission.admitted);

        info!(
            "Routed {} customers on {} vehicles, {} rejected",
            admission.admitted.len(),
            routes.iter().filter(|route| !route.is_empty()).count(),
            admission.rejected.len()
        );

        Ok(DispatchOutcome::Solved(DispatchPlan {
            routes,
            rejected: admission.rejected,
        }))
    }

    fn empty_routes(&self) -> Vec<VehicleRoute> {
        VehicleIdx::range(self.fleet.len())
            .map(|vehicle| VehicleRoute::empty(vehicle, self.fleet.vehicle(vehicle).capacity()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_utils::{MockProvider, create_customer, create_fleet};

    const DEPOT: Coordinates = Coordinates::new(0.0, 0.0);

    fn planner(capacities: &[u64]) -> DispatchPlanner<MockProvider> {
        DispatchPlanner::new(MockProvider::new(100.0), create_fleet(capacities))
            .with_depot(Some(DEPOT))
    }

    fn solved(outcome: DispatchOutcome) -> DispatchPlan {
        match outcome {
            DispatchOutcome::Solved(plan) => plan,
            DispatchOutcome::Infeasible { .. } => panic!("expected a solved outcome"),
        }
    }

    #[tokio::test]
    async fn test_everything_fits_one_vehicle() {
        let planner = planner(&[1000]);
        let customers = vec![
            create_customer("A", 0.0, 3.0, 400, "10:00"),
            create_customer("B", 0.0, 2.0, 300, "11:00"),
            create_customer("C", 0.0, 1.0, 200, "09:30"),
        ];

        let plan = solved(planner.plan(&customers).await.unwrap());

        assert!(plan.rejected.is_empty());
        assert_eq!(plan.routes.len(), 1);
        assert_eq!(plan.routes[0].route, vec!["C", "B", "A"]);
        assert_eq!(plan.routes[0].load, 900);
        for stop in &plan.routes[0].stops {
            assert!(stop.arrival <= stop.deadline.seconds_since_midnight());
        }
        assert_eq!(planner.provider().calls(), 4);
    }

    #[tokio::test]
    async fn test_heavy_customer_is_rejected() {
        let planner = planner(&[1500]);
        let customers = vec![
            create_customer("heavy", 0.0, 1.0, 2000, "10:00"),
            create_customer("light", 0.0, 2.0, 100, "11:00"),
        ];

        let plan = solved(planner.plan(&customers).await.unwrap());

        assert_eq!(plan.routes[0].route, vec!["light"]);
        assert_eq!(plan.rejected, vec![customers[0].clone()]);
    }

    #[tokio::test]
    async fn test_no_customers_never_calls_provider() {
        let planner = planner(&[1000]);

        let result = planner.plan(&[]).await;

        assert!(matches!(result, Err(DispatchError::NoCustomers)));
        assert_eq!(planner.provider().calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_aborts_solve() {
        let customers = vec![
            create_customer("A", 0.0, 1.0, 100, "10:00"),
            create_customer("B", 0.0, 2.0, 100, "10:00"),
        ];
        let planner = DispatchPlanner::new(
            MockProvider::new(100.0).failing_at(*customers[1].location()),
            create_fleet(&[1000]),
        )
        .with_depot(Some(DEPOT));

        let result = planner.plan(&customers).await;

        assert!(matches!(result, Err(DispatchError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_missed_deadline_is_infeasible() {
        let planner = planner(&[1000, 1000]);
        let customers = vec![
            create_customer("far", 0.0, 10.0, 100, "00:01"),
            create_customer("heavy", 0.0, 1.0, 5000, "10:00"),
        ];

        let outcome = planner.plan(&customers).await.unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::Infeasible {
                rejected: vec![customers[1].clone()]
            }
        );
    }

    #[tokio::test]
    async fn test_nothing_admitted_is_solved_with_empty_routes() {
        let planner = planner(&[1500, 750]);
        let customers = vec![create_customer("heavy", 0.0, 1.0, 3000, "10:00")];

        let plan = solved(planner.plan(&customers).await.unwrap());

        assert_eq!(plan.routes.len(), 2);
        assert!(plan.routes.iter().all(VehicleRoute::is_empty));
        assert_eq!(plan.routes[1].vehicle, 2);
        assert_eq!(plan.routes[1].capacity, 750);
        assert_eq!(plan.rejected.len(), 1);
        assert_eq!(planner.provider().calls(), 0);
    }

    #[tokio::test]
    async fn test_first_customer_is_depot_fallback() {
        let planner = DispatchPlanner::new(MockProvider::new(100.0), create_fleet(&[1000]));
        let customers = vec![
            create_customer("A", 0.0, 1.0, 100, "10:00"),
            create_customer("B", 0.0, 2.0, 100, "10:00"),
        ];

        let plan = solved(planner.plan(&customers).await.unwrap());

        assert_eq!(plan.routes[0].route, vec!["A", "B"]);
        assert_eq!(plan.routes[0].stops[0].arrival, 0);
        assert_eq!(plan.routes[0].travel_time, 200);
    }

    #[tokio::test]
    async fn test_routes_respect_capacity_and_deadlines() {
        let planner = planner(&[600, 600, 400]);
        let customers = (0..12)
            .map(|index| {
                create_customer(
                    &format!("c{index}"),
                    0.0,
                    (index % 5) as f64 + 0.5,
                    100 + 10 * (index % 3),
                    &format!("{:02}:00", 8 + index % 4),
                )
            })
            .collect::<Vec<_>>();

        let plan = solved(planner.plan(&customers).await.unwrap());

        let routed: usize = plan.routes.iter().map(|route| route.route.len()).sum();
        assert_eq!(routed + plan.rejected.len(), customers.len());

        for route in &plan.routes {
            assert!(route.load <= route.capacity);
            for stop in &route.stops {
                assert!(stop.arrival <= stop.deadline.seconds_since_midnight());
            }
        }
    }

    #[tokio::test]
    async fn test_same_input_same_routes() {
        let planner = planner(&[800, 800]);
        let customers = (0..6)
            .map(|index| {
                create_customer(&format!("c{index}"), 0.0, index as f64, 200, "12:00")
            })
            .collect::<Vec<_>>();

        let first = planner.plan(&customers).await.unwrap();
        let second = planner.plan(&customers).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected() {
        let planner = planner(&[1000]);
        let inputs = vec![CustomerInput {
            name: "A".to_string(),
            lat: 0.0,
            lng: 1.0,
            weight: Some(json!("lots")),
            deadline: "10:00".to_string(),
        }];

        let result = planner.plan_inputs(inputs).await;

        assert!(matches!(
            result,
            Err(DispatchError::InvalidCustomer(CustomerError::InvalidWeight { .. }))
        ));
        assert_eq!(planner.provider().calls(), 0);
    }

    #[tokio::test]
    async fn test_plan_serialized_shape() {
        let planner = planner(&[1000]);
        let customers = vec![
            create_customer("A", 0.0, 1.0, 400, "10:00"),
            create_customer("B", 0.0, 2.0, 900, "11:00"),
        ];

        let plan = solved(planner.plan(&customers).await.unwrap());
        let value = serde_json::to_value(&plan).unwrap();

        assert_eq!(value["routes"][0]["route"], json!(["A"]));
        assert_eq!(value["removedCustomers"][0]["name"], "B");
    }
}

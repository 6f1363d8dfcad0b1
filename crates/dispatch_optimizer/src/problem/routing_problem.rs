use tracing::debug;

use crate::{
    define_index_newtype,
    problem::{
        customer::Customer,
        distance_matrix::{Cost, DistanceMatrix},
        error::ProblemError,
        time_window::TimeWindow,
        vehicle::{Fleet, VehicleIdx},
    },
};

define_index_newtype!(NodeIdx);

pub const DEPOT: NodeIdx = NodeIdx::new(0);

/// Maximum elapsed time of a route, 24 hours.
pub const TIME_HORIZON: u64 = 24 * 3600;

/// Waiting time allowed on every arc of the time dimension.
pub const TIME_SLACK: u64 = 30;

/// Cumulative elapsed time along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDimension {
    slack_max: u64,
    horizon: u64,
}

impl TimeDimension {
    pub fn new(slack_max: u64, horizon: u64) -> Self {
        TimeDimension { slack_max, horizon }
    }

    pub fn slack_max(&self) -> u64 {
        self.slack_max
    }

    pub fn horizon(&self) -> u64 {
        self.horizon
    }

    /// Time at which `window` is reached when arriving at `arrival`, or
    /// `None` if the arc cannot be taken.
    pub fn cumul_at(&self, arrival: u64, window: &TimeWindow) -> Option<u64> {
        let waiting = window.earliest().saturating_sub(arrival);
        if waiting > self.slack_max {
            return None;
        }

        let cumul = arrival + waiting;
        if cumul > self.horizon || !window.is_satisfied(cumul) {
            return None;
        }

        Some(cumul)
    }
}

impl Default for TimeDimension {
    fn default() -> Self {
        TimeDimension::new(TIME_SLACK, TIME_HORIZON)
    }
}

/// A capacitated routing instance with a time dimension.
///
/// Node 0 is the depot, node `i` (1..=n) is the `i - 1`th customer the problem
/// was built from. Every lookup is a pure function of the indexed arrays.
#[derive(Debug, Clone)]
pub struct RoutingProblem {
    matrix: DistanceMatrix,
    demands: Vec<u64>,
    time_windows: Vec<TimeWindow>,
    capacities: Vec<u64>,
    time_dimension: TimeDimension,
}

impl RoutingProblem {
    /// `matrix` must cover the depot plus every customer, in that order.
    pub fn build(
        customers: &[Customer],
        fleet: &Fleet,
        matrix: DistanceMatrix,
    ) -> Result<Self, ProblemError> {
        RoutingProblem::build_with_time_dimension(
            customers,
            fleet,
            matrix,
            TimeDimension::default(),
        )
    }

    pub fn build_with_time_dimension(
        customers: &[Customer],
        fleet: &Fleet,
        matrix: DistanceMatrix,
        time_dimension: TimeDimension,
    ) -> Result<Self, ProblemError> {
        if fleet.is_empty() {
            return Err(ProblemError::EmptyFleet);
        }

        let num_nodes = customers.len() + 1;
        if matrix.num_nodes() != num_nodes {
            return Err(ProblemError::MatrixRowCount {
                expected: num_nodes,
                rows: matrix.num_nodes(),
            });
        }

        let demands = std::iter::once(0)
            .chain(customers.iter().map(|customer| customer.weight()))
            .collect();

        let time_windows = std::iter::once(TimeWindow::until(time_dimension.horizon()))
            .chain(customers.iter().map(|customer| {
                TimeWindow::until(customer.deadline().seconds_since_midnight())
            }))
            .collect();

        let capacities = fleet
            .vehicles()
            .iter()
            .map(|vehicle| vehicle.capacity())
            .collect();

        debug!(
            "Built routing problem: {} nodes, {} vehicles",
            num_nodes,
            fleet.len()
        );

        Ok(RoutingProblem {
            matrix,
            demands,
            time_windows,
            capacities,
            time_dimension,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.demands.len()
    }

    pub fn num_vehicles(&self) -> usize {
        self.capacities.len()
    }

    pub fn depot(&self) -> NodeIdx {
        DEPOT
    }

    /// Customer nodes, depot excluded.
    pub fn customer_nodes(
        &self,
    ) -> impl DoubleEndedIterator<Item = NodeIdx> + ExactSizeIterator {
        NodeIdx::range(self.num_nodes()).skip(1)
    }

    /// Position of the node's customer in the list the problem was built from.
    pub fn customer_index(&self, node: NodeIdx) -> Option<usize> {
        if node == DEPOT || node.get() >= self.num_nodes() {
            None
        } else {
            Some(node.get() - 1)
        }
    }

    #[inline]
    pub fn transit_cost(&self, from: NodeIdx, to: NodeIdx) -> Cost {
        self.matrix.cost(from, to)
    }

    /// Travel time and routing cost are the same metric.
    #[inline]
    pub fn time_transit(&self, from: NodeIdx, to: NodeIdx) -> u64 {
        self.matrix.cost(from, to)
    }

    #[inline]
    pub fn demand(&self, node: NodeIdx) -> u64 {
        self.demands[node.get()]
    }

    #[inline]
    pub fn vehicle_capacity(&self, vehicle: VehicleIdx) -> u64 {
        self.capacities[vehicle.get()]
    }

    pub fn vehicle_capacities(&self) -> &[u64] {
        &self.capacities
    }

    #[inline]
    pub fn time_window(&self, node: NodeIdx) -> &TimeWindow {
        &self.time_windows[node.get()]
    }

    pub fn time_dimension(&self) -> &TimeDimension {
        &self.time_dimension
    }
}

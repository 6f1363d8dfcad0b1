use crate::problem::{routing_problem::NodeIdx, vehicle::VehicleIdx};

/// Position while walking a vehicle path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// The vehicle's start depot.
    Start,
    Visit(NodeIdx),
    /// The vehicle's end depot.
    End,
}

/// Solver output: for every vehicle, a start and a successor function
/// terminating at [`PathStep::End`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    first_visits: Vec<Option<NodeIdx>>,
    successors: Vec<Option<NodeIdx>>,
}

impl Assignment {
    /// `paths[v]` lists the customer nodes visited by vehicle `v`, in order.
    pub fn from_paths(num_nodes: usize, paths: &[Vec<NodeIdx>]) -> Self {
        let mut successors = vec![None; num_nodes];

        for path in paths {
            for (position, &node) in path.iter().enumerate() {
                successors[node.get()] = path.get(position + 1).copied();
            }
        }

        Assignment {
            first_visits: paths.iter().map(|path| path.first().copied()).collect(),
            successors,
        }
    }

    pub fn num_vehicles(&self) -> usize {
        self.first_visits.len()
    }

    pub fn start(&self, _vehicle: VehicleIdx) -> PathStep {
        PathStep::Start
    }

    pub fn next(&self, vehicle: VehicleIdx, step: PathStep) -> PathStep {
        let next = match step {
            PathStep::Start => self.first_visits[vehicle.get()],
            PathStep::Visit(node) => self.successors[node.get()],
            PathStep::End => return PathStep::End,
        };

        next.map_or(PathStep::End, PathStep::Visit)
    }

    pub fn is_end(&self, step: PathStep) -> bool {
        step == PathStep::End
    }

    /// Nodes visited by `vehicle`, in order.
    pub fn path(&self, vehicle: VehicleIdx) -> Vec<NodeIdx> {
        let mut nodes = Vec::new();
        let mut step = self.next(vehicle, self.start(vehicle));

        while let PathStep::Visit(node) = step {
            nodes.push(node);
            step = self.next(vehicle, step);
        }

        nodes
    }
}

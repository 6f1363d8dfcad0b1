use crate::problem::{error::ProblemError, routing_problem::NodeIdx};

pub type Cost = u64;

/// Cost substituted for pairs the provider could not compute.
///
/// Larger than the time horizon, so any route using such an arc violates the
/// time dimension.
pub const UNREACHABLE_COST: Cost = 10_000_000;

/// Square travel time matrix, node 0 being the depot.
///
/// Stored flat, `index = from * num_nodes + to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    costs: Vec<Cost>,
    num_nodes: usize,
}

impl DistanceMatrix {
    /// Fails when `rows` is not a square `expected x expected` matrix.
    pub fn from_rows(rows: Vec<Vec<Cost>>, expected: usize) -> Result<Self, ProblemError> {
        if rows.len() != expected {
            return Err(ProblemError::MatrixRowCount {
                expected,
                rows: rows.len(),
            });
        }

        if let Some((row, values)) = rows
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != expected)
        {
            return Err(ProblemError::MatrixRowLength {
                row,
                len: values.len(),
                expected,
            });
        }

        Ok(DistanceMatrix {
            costs: rows.into_iter().flatten().collect(),
            num_nodes: expected,
        })
    }

    #[inline(always)]
    fn index(&self, from: NodeIdx, to: NodeIdx) -> usize {
        from.get() * self.num_nodes + to.get()
    }

    #[inline(always)]
    pub fn cost(&self, from: NodeIdx, to: NodeIdx) -> Cost {
        self.costs[self.index(from, to)]
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cost]> {
        self.costs.chunks(self.num_nodes.max(1))
    }
}
